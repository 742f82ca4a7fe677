mod auth;
mod base;
mod schedule;
mod status;
mod user;

use auth::AuthClient;
pub use auth::SignUpInput;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use dayline_api_structs::dtos::*;
pub use dayline_api_structs::save_schedule::TaskBlockRequest;
pub use dayline_api_structs::TokenPair;
pub use dayline_domain::{Day, TimeOfDay};
use schedule::ScheduleClient;
pub use schedule::SaveScheduleInput;
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;
pub use user::UpdateSettingsInput;

/// Dayline server SDK
///
/// The SDK contains methods for interacting with the dayline server API.
#[derive(Clone)]
pub struct DaylineSDK {
    pub auth: AuthClient,
    pub schedule: ScheduleClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl DaylineSDK {
    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let auth = AuthClient::new(base.clone());
        let schedule = ScheduleClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            auth,
            schedule,
            status,
            user,
        }
    }

    /// Client without credentials, only signup, login and the health
    /// endpoint will accept its requests
    pub fn new(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    /// Client that sends the given access token as a bearer token on
    /// every request
    pub fn with_token<T: Into<String>>(address: String, access_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_access_token(access_token.into());
        Self::create(base)
    }
}
