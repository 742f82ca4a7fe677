mod link_code;
mod refresh_token;
mod schedule;
mod shared;
mod task;
mod user;

use link_code::{InMemoryLinkCodeRepo, PostgresLinkCodeRepo};
pub use link_code::ILinkCodeRepo;
use refresh_token::{InMemoryRefreshTokenRepo, PostgresRefreshTokenRepo};
pub use refresh_token::IRefreshTokenRepo;
use schedule::{InMemoryScheduleRepo, PostgresScheduleRepo};
pub use schedule::IScheduleRepo;
pub use shared::repo::DeleteResult;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use task::{InMemoryTaskRepo, PostgresTaskRepo};
pub use task::ITaskRepo;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub schedules: Arc<dyn IScheduleRepo>,
    pub tasks: Arc<dyn ITaskRepo>,
    pub refresh_tokens: Arc<dyn IRefreshTokenRepo>,
    pub link_codes: Arc<dyn ILinkCodeRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        sqlx::query("SELECT 1").fetch_one(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            schedules: Arc::new(PostgresScheduleRepo::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepo::new(pool.clone())),
            refresh_tokens: Arc::new(PostgresRefreshTokenRepo::new(pool.clone())),
            link_codes: Arc::new(PostgresLinkCodeRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        // Tasks look up schedules to resolve dates, so the two stores share
        // the schedule repo
        let schedules = Arc::new(InMemoryScheduleRepo::new());
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            schedules: schedules.clone(),
            tasks: Arc::new(InMemoryTaskRepo::new(schedules)),
            refresh_tokens: Arc::new(InMemoryRefreshTokenRepo::new()),
            link_codes: Arc::new(InMemoryLinkCodeRepo::new()),
        }
    }
}
