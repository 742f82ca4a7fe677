use super::IRefreshTokenRepo;
use crate::repos::shared::repo::DeleteResult;
use dayline_domain::RefreshToken;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresRefreshTokenRepo {
    pool: PgPool,
}

impl PostgresRefreshTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RefreshTokenRaw {
    user_uid: Uuid,
    token: String,
    expires_at: i64,
}

impl Into<RefreshToken> for RefreshTokenRaw {
    fn into(self) -> RefreshToken {
        RefreshToken {
            user_id: self.user_uid.into(),
            token: self.token,
            expires_at: self.expires_at,
        }
    }
}

#[async_trait::async_trait]
impl IRefreshTokenRepo for PostgresRefreshTokenRepo {
    async fn insert(&self, token: &RefreshToken) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens(token, user_uid, expires_at)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.inner_ref())
        .bind(token.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Option<RefreshToken> {
        let token: RefreshTokenRaw = match sqlx::query_as(
            r#"
            SELECT * FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        {
            Ok(token) => token,
            Err(_) => return None,
        };
        Some(token.into())
    }

    async fn delete_by_token(&self, token: &str) -> DeleteResult {
        let res = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await;
        DeleteResult {
            deleted_count: res.map(|r| r.rows_affected() as i64).unwrap_or(0),
        }
    }
}
