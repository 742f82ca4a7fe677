use crate::error::DaylineError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use dayline_api_structs::logout::*;
use dayline_infra::DaylineContext;

pub async fn logout_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let usecase = LogoutUseCase {
        refresh_token: body.0.refresh_token,
    };

    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "Logged out.".into(),
            })
        })
        .map_err(DaylineError::from)
}

#[derive(Debug)]
pub struct LogoutUseCase {
    pub refresh_token: String,
}

#[derive(Debug)]
pub struct UseCaseRes {}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LogoutUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "Logout";

    /// Logging out an already revoked or unknown token is fine, the end
    /// state is the same
    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .refresh_tokens
            .delete_by_token(&self.refresh_token)
            .await;
        Ok(UseCaseRes {})
    }
}
