use chrono_tz::Tz;
use dayline_domain::DEFAULT_TIMEZONE;
use dayline_utils::create_random_secret;
use tracing::{info, log::warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign and verify auth tokens
    pub api_secret: String,
    /// Token for the telegram bot api. When it is missing the app still
    /// runs, but reminder delivery and webhook replies are disabled.
    pub telegram_bot_token: Option<String>,
    /// Shared secret that telegram echoes back on webhook requests.
    /// Verified only when set.
    pub telegram_webhook_secret: Option<String>,
    /// Timezone used when a user timezone cannot be resolved
    pub fallback_timezone: Tz,
    /// How long an access token stays valid, in millis
    pub access_token_ttl: i64,
    /// How long a refresh token stays valid, in millis
    pub refresh_token_ttl: i64,
    /// How long a telegram link code stays valid, in millis
    pub link_code_ttl: i64,
    /// Pause between two notification passes, in seconds
    pub reminder_interval_secs: u64,
    /// Consecutive failed passes before the loop backs off
    pub reminder_failure_threshold: usize,
    /// Length of the extended pause after too many failed passes, in seconds
    pub reminder_cooldown_secs: u64,
    /// Delivery attempts for a single notification within one pass
    pub delivery_max_attempts: u32,
    /// Pause between delivery attempts, in millis
    pub delivery_retry_backoff: u64,
}

impl Config {
    pub fn new() -> Self {
        let api_secret = match std::env::var("API_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find API_SECRET environment variable. Going to create one, tokens will not survive a restart.");
                create_random_secret(64)
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let telegram_bot_token = match std::env::var("TELEGRAM_BOT_TOKEN") {
            Ok(token) => Some(token),
            Err(_) => {
                warn!("Did not find TELEGRAM_BOT_TOKEN environment variable. Telegram delivery is disabled.");
                None
            }
        };
        let telegram_webhook_secret = std::env::var("TELEGRAM_WEBHOOK_SECRET").ok();

        let fallback_timezone = std::env::var("FALLBACK_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.into());
        let fallback_timezone = match fallback_timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn!(
                    "The given FALLBACK_TIMEZONE: {} is not a valid timezone, falling back to: {}.",
                    fallback_timezone, DEFAULT_TIMEZONE
                );
                DEFAULT_TIMEZONE.parse::<Tz>().unwrap()
            }
        };

        Self {
            port,
            api_secret,
            telegram_bot_token,
            telegram_webhook_secret,
            fallback_timezone,
            access_token_ttl: 1000 * 60 * 30,            // 30 minutes
            refresh_token_ttl: 1000 * 60 * 60 * 24 * 30, // 30 days
            link_code_ttl: 1000 * 60 * 10,               // 10 minutes
            reminder_interval_secs: 60,
            reminder_failure_threshold: 5,
            reminder_cooldown_secs: 60 * 5,
            delivery_max_attempts: 3,
            delivery_retry_backoff: 1000 * 2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
