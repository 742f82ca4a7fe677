use crate::error::DaylineError;
use crate::shared::auth::create_access_token;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use dayline_api_structs::refresh_token::*;
use dayline_domain::User;
use dayline_infra::DaylineContext;

pub async fn refresh_token_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let usecase = RefreshTokenUseCase {
        refresh_token: body.0.refresh_token,
    };

    let res = execute(usecase, &ctx).await.map_err(DaylineError::from)?;
    let access_token = create_access_token(&res.user.id, &ctx)?;

    Ok(HttpResponse::Ok().json(APIResponse { access_token }))
}

#[derive(Debug)]
pub struct RefreshTokenUseCase {
    pub refresh_token: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidToken,
}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidToken => {
                Self::Unauthorized("Invalid or expired refresh token provided.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RefreshTokenUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "RefreshToken";

    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let token = match ctx
            .repos
            .refresh_tokens
            .find_by_token(&self.refresh_token)
            .await
        {
            Some(token) => token,
            None => return Err(UseCaseError::InvalidToken),
        };

        if token.is_expired(ctx.sys.get_timestamp_millis()) {
            // Expired tokens can be deleted right away
            ctx.repos.refresh_tokens.delete_by_token(&token.token).await;
            return Err(UseCaseError::InvalidToken);
        }

        match ctx.repos.users.find(&token.user_id).await {
            Some(user) => Ok(UseCaseRes { user }),
            None => Err(UseCaseError::InvalidToken),
        }
    }
}
