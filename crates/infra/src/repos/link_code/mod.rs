mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use dayline_domain::TelegramLinkCode;
pub use inmemory::InMemoryLinkCodeRepo;
pub use postgres::PostgresLinkCodeRepo;

#[async_trait::async_trait]
pub trait ILinkCodeRepo: Send + Sync {
    /// Insert the code and drop any outstanding code of the same user, so
    /// that only the latest code can be redeemed
    async fn replace_for_user(&self, code: &TelegramLinkCode) -> anyhow::Result<()>;
    async fn find_by_code(&self, code: &str) -> Option<TelegramLinkCode>;
    async fn delete_by_code(&self, code: &str) -> DeleteResult;
}
