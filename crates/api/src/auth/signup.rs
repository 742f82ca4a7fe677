use crate::error::DaylineError;
use crate::shared::auth::create_access_token;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use dayline_api_structs::signup::*;
use dayline_domain::{RefreshToken, User};
use dayline_infra::DaylineContext;

pub async fn signup_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let usecase = SignupUseCase {
        username: body.0.username,
        password: body.0.password,
        name: body.0.name,
    };

    let res = execute(usecase, &ctx).await.map_err(DaylineError::from)?;
    let access_token = create_access_token(&res.user.id, &ctx)?;

    Ok(HttpResponse::Created().json(APIResponse {
        access_token,
        refresh_token: res.refresh_token.token,
    }))
}

#[derive(Debug)]
pub struct SignupUseCase {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
    pub refresh_token: RefreshToken,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    UsernameTaken,
    EmptyUsername,
    PasswordTooShort,
}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UsernameTaken => Self::Conflict(
                "A user with that username already exists. Usernames need to be unique.".into(),
            ),
            UseCaseError::EmptyUsername => {
                Self::BadClientData("Username must not be empty.".into())
            }
            UseCaseError::PasswordTooShort => {
                Self::BadClientData("Password must be at least 8 characters long.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SignupUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "Signup";

    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let username = self.username.trim().to_lowercase();
        if username.is_empty() {
            return Err(UseCaseError::EmptyUsername);
        }
        if self.password.chars().count() < 8 {
            return Err(UseCaseError::PasswordTooShort);
        }

        if ctx.repos.users.find_by_username(&username).await.is_some() {
            return Err(UseCaseError::UsernameTaken);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(self.password.as_bytes(), &salt)
            .map_err(|_| UseCaseError::StorageError)?
            .to_string();

        let now = ctx.sys.get_timestamp_millis();
        let user = User::new(username, password_hash, self.name.clone(), now);
        if ctx.repos.users.insert(&user).await.is_err() {
            return Err(UseCaseError::StorageError);
        }

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
