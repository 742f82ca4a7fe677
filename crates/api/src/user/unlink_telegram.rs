use crate::shared::usecase::{execute, UseCase};
use crate::{error::DaylineError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dayline_api_structs::unlink_telegram::*;
use dayline_domain::User;
use dayline_infra::DaylineContext;

pub async fn unlink_telegram_controller(
    http_req: HttpRequest,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = UnlinkTelegramUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.user)))
        .map_err(DaylineError::from)
}

#[derive(Debug)]
pub struct UnlinkTelegramUseCase {
    pub user: User,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
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
impl UseCase for UnlinkTelegramUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UnlinkTelegram";

    /// Unlinking when no telegram chat is attached is a noop
    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let mut user = self.user.clone();
        user.telegram = None;
        user.updated = ctx.sys.get_timestamp_millis();

        match ctx.repos.users.save(&user).await {
            Ok(_) => Ok(UseCaseRes { user }),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
