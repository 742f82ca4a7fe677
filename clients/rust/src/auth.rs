use crate::{APIResponse, BaseClient};
use dayline_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthClient {
    base: Arc<BaseClient>,
}

pub struct SignUpInput {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
}

impl AuthClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn signup(&self, input: SignUpInput) -> APIResponse<signup::APIResponse> {
        let body = signup::RequestBody {
            username: input.username,
            password: input.password,
            name: input.name,
        };
        self.base
            .post(body, "auth/signup".into(), StatusCode::CREATED)
            .await
    }

    pub async fn login(
        &self,
        username: String,
        password: String,
    ) -> APIResponse<login::APIResponse> {
        let body = login::RequestBody { username, password };
        self.base
            .post(body, "auth/login".into(), StatusCode::OK)
            .await
    }

    pub async fn refresh_token(
        &self,
        refresh_token: String,
    ) -> APIResponse<refresh_token::APIResponse> {
        let body = refresh_token::RequestBody { refresh_token };
        self.base
            .post(body, "auth/token/refresh".into(), StatusCode::OK)
            .await
    }

    pub async fn logout(&self, refresh_token: String) -> APIResponse<logout::APIResponse> {
        let body = logout::RequestBody { refresh_token };
        self.base
            .post(body, "auth/logout".into(), StatusCode::OK)
            .await
    }
}
