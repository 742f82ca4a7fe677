use super::ILinkCodeRepo;
use crate::repos::shared::repo::DeleteResult;
use dayline_domain::TelegramLinkCode;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresLinkCodeRepo {
    pool: PgPool,
}

impl PostgresLinkCodeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LinkCodeRaw {
    user_uid: Uuid,
    code: String,
    expires_at: i64,
}

impl Into<TelegramLinkCode> for LinkCodeRaw {
    fn into(self) -> TelegramLinkCode {
        TelegramLinkCode {
            user_id: self.user_uid.into(),
            code: self.code,
            expires_at: self.expires_at,
        }
    }
}

#[async_trait::async_trait]
impl ILinkCodeRepo for PostgresLinkCodeRepo {
    async fn replace_for_user(&self, code: &TelegramLinkCode) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            DELETE FROM link_codes
            WHERE user_uid = $1
            "#,
        )
        .bind(code.user_id.inner_ref())
        .execute(&mut tx)
        .await?;
        sqlx::query(
            r#"
            INSERT INTO link_codes(code, user_uid, expires_at)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(&code.code)
        .bind(code.user_id.inner_ref())
        .bind(code.expires_at)
        .execute(&mut tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Option<TelegramLinkCode> {
        let code: LinkCodeRaw = match sqlx::query_as(
            r#"
            SELECT * FROM link_codes
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
        {
            Ok(code) => code,
            Err(_) => return None,
        };
        Some(code.into())
    }

    async fn delete_by_code(&self, code: &str) -> DeleteResult {
        let res = sqlx::query(
            r#"
            DELETE FROM link_codes
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(&self.pool)
        .await;
        DeleteResult {
            deleted_count: res.map(|r| r.rows_affected() as i64).unwrap_or(0),
        }
    }
}
