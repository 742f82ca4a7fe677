use crate::shared::usecase::{execute, UseCase};
use crate::{error::DaylineError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dayline_api_structs::create_link_code::*;
use dayline_domain::{TelegramLinkCode, ID};
use dayline_infra::DaylineContext;

pub async fn create_link_code_controller(
    http_req: HttpRequest,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = CreateLinkCodeUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                code: res.code.code,
                expires_at: res.code.expires_at,
            })
        })
        .map_err(DaylineError::from)
}

#[derive(Debug)]
pub struct CreateLinkCodeUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub code: TelegramLinkCode,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateLinkCodeUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateLinkCode";

    /// A new code always replaces the outstanding one, at most one code
    /// per user can be redeemed
    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let code = TelegramLinkCode::new(self.user_id.clone(), now + ctx.config.link_code_ttl);

        match ctx.repos.link_codes.replace_for_user(&code).await {
            Ok(_) => Ok(UseCaseRes { code }),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayline_domain::User;

    #[actix_web::main]
    #[test]
    async fn it_issues_codes_and_replaces_outstanding_ones() {
        let ctx = DaylineContext::create_inmemory();
        let user = User::new("lena".into(), "hash".into(), None, 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let mut usecase = CreateLinkCodeUseCase {
            user_id: user.id.clone(),
        };
        let first = usecase.execute(&ctx).await.expect("To create link code");
        assert_eq!(first.code.code.len(), 6);
        assert!(first.code.code.chars().all(|c| c.is_ascii_digit()));

        let mut usecase = CreateLinkCodeUseCase {
            user_id: user.id.clone(),
        };
        let second = usecase.execute(&ctx).await.expect("To create link code");

        assert!(ctx
            .repos
            .link_codes
            .find_by_code(&first.code.code)
            .await
            .is_none());
        assert!(ctx
            .repos
            .link_codes
            .find_by_code(&second.code.code)
            .await
            .is_some());
    }
}
