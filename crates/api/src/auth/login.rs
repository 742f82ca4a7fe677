use crate::error::DaylineError;
use crate::shared::auth::create_access_token;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use dayline_api_structs::login::*;
use dayline_domain::{RefreshToken, User};
use dayline_infra::DaylineContext;

pub async fn login_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let usecase = LoginUseCase {
        username: body.0.username,
        password: body.0.password,
    };

    let res = execute(usecase, &ctx).await.map_err(DaylineError::from)?;
    let access_token = create_access_token(&res.user.id, &ctx)?;

    Ok(HttpResponse::Ok().json(APIResponse {
        access_token,
        refresh_token: res.refresh_token.token,
    }))
}

#[derive(Debug)]
pub struct LoginUseCase {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
    pub refresh_token: RefreshToken,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    /// Unknown username and wrong password share this error, responses
    /// must not reveal which usernames exist
    InvalidCredentials,
}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid username or password provided.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "Login";

    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let username = self.username.trim().to_lowercase();
        let user = match ctx.repos.users.find_by_username(&username).await {
            Some(user) => user,
            None => return Err(UseCaseError::InvalidCredentials),
        };

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| UseCaseError::InvalidCredentials)?;
        let valid = Argon2::default()
            .verify_password(self.password.as_bytes(), &parsed_hash)
            .is_ok();
        if !valid {
            return Err(UseCaseError::InvalidCredentials);
        }

        let now = ctx.sys.get_timestamp_millis();
        let refresh_token =
            RefreshToken::new(user.id.clone(), now + ctx.config.refresh_token_ttl);
        if ctx.repos.refresh_tokens.insert(&refresh_token).await.is_err() {
            return Err(UseCaseError::StorageError);
        }

        Ok(UseCaseRes {
            user,
            refresh_token,
        })
    }
}
