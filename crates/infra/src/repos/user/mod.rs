mod inmemory;
mod postgres;

use dayline_domain::{User, ID};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_username(&self, username: &str) -> Option<User>;
    async fn find_by_chat_id(&self, chat_id: &str) -> Option<User>;
    /// Every user that has a telegram chat connected. Unlike the other
    /// lookups a storage failure surfaces here, the notification pass
    /// needs to tell "nobody is linked" apart from "storage is down".
    async fn find_with_telegram_linked(&self) -> anyhow::Result<Vec<User>>;
}
