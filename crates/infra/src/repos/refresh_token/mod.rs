mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use dayline_domain::RefreshToken;
pub use inmemory::InMemoryRefreshTokenRepo;
pub use postgres::PostgresRefreshTokenRepo;

#[async_trait::async_trait]
pub trait IRefreshTokenRepo: Send + Sync {
    async fn insert(&self, token: &RefreshToken) -> anyhow::Result<()>;
    async fn find_by_token(&self, token: &str) -> Option<RefreshToken>;
    async fn delete_by_token(&self, token: &str) -> DeleteResult;
}

#[cfg(test)]
mod tests {
    use crate::DaylineContext;
    use dayline_domain::{RefreshToken, User};

    #[tokio::test]
    async fn it_inserts_finds_and_deletes_tokens() {
        let ctx = DaylineContext::create_inmemory();
        let user = User::new("lena".into(), "hash".into(), None, 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let token = RefreshToken::new(user.id.clone(), 1000);
        ctx.repos
            .refresh_tokens
            .insert(&token)
            .await
            .expect("To insert refresh token");

        let found = ctx
            .repos
            .refresh_tokens
            .find_by_token(&token.token)
            .await
            .expect("To find refresh token");
        assert_eq!(found.user_id, user.id);
        assert_eq!(found.expires_at, 1000);
        assert!(ctx
            .repos
            .refresh_tokens
            .find_by_token("unknown-token")
            .await
            .is_none());

        let res = ctx.repos.refresh_tokens.delete_by_token(&token.token).await;
        assert_eq!(res.deleted_count, 1);
        // Deleting again is a noop
        let res = ctx.repos.refresh_tokens.delete_by_token(&token.token).await;
        assert_eq!(res.deleted_count, 0);
        assert!(ctx
            .repos
            .refresh_tokens
            .find_by_token(&token.token)
            .await
            .is_none());
    }
}
