use super::IRefreshTokenRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use dayline_domain::RefreshToken;
use std::sync::Mutex;

pub struct InMemoryRefreshTokenRepo {
    tokens: Mutex<Vec<RefreshToken>>,
}

impl InMemoryRefreshTokenRepo {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IRefreshTokenRepo for InMemoryRefreshTokenRepo {
    async fn insert(&self, token: &RefreshToken) -> anyhow::Result<()> {
        insert(token, &self.tokens);
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Option<RefreshToken> {
        find_by(&self.tokens, |t| t.token == token)
            .into_iter()
            .next()
    }

    async fn delete_by_token(&self, token: &str) -> DeleteResult {
        delete_by(&self.tokens, |t| t.token == token)
    }
}
