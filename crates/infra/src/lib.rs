mod config;
mod repos;
mod services;
mod system;

use chrono::DateTime;
use chrono_tz::Tz;
pub use config::Config;
use dayline_domain::User;
pub use repos::{DeleteResult, Repos};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct DaylineContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub messenger: Arc<dyn IMessenger>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl DaylineContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let messenger = Arc::new(TelegramMessenger::new(config.telegram_bot_token.clone()));
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            messenger,
        }
    }

    /// Context backed by in memory storage and an in memory messenger,
    /// used by tests so that they do not need postgres or telegram
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            messenger: Arc::new(InMemoryMessenger::new()),
        }
    }

    /// The current time in the timezone the given user prefers. A user
    /// with an unparseable timezone gets the configured fallback, which
    /// is logged but never treated as an error.
    pub fn local_datetime(&self, user: &User) -> DateTime<Tz> {
        let tz = match user.settings.tz() {
            Some(tz) => tz,
            None => {
                warn!(
                    "User: {} has an invalid timezone: {}. Falling back to: {}.",
                    user.id, user.settings.timezone, self.config.fallback_timezone
                );
                self.config.fallback_timezone
            }
        };
        self.sys.get_utc_datetime().with_timezone(&tz)
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> DaylineContext {
    DaylineContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
