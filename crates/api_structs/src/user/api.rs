use dayline_domain::User;
use serde::{Deserialize, Serialize};

use crate::dtos::UserSettingsDTO;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsResponse {
    pub settings: UserSettingsDTO,
}

impl UserSettingsResponse {
    pub fn new(user: User) -> Self {
        Self {
            settings: UserSettingsDTO::new(user),
        }
    }
}

pub mod get_settings {
    use super::*;

    pub type APIResponse = UserSettingsResponse;
}

pub mod update_settings {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub remind_before: Option<bool>,
        #[serde(default)]
        pub remind_on_start: Option<bool>,
        #[serde(default)]
        pub nudge_mid: Option<bool>,
        #[serde(default)]
        pub congratulate_on_end: Option<bool>,
        #[serde(default)]
        pub slot_duration_minutes: Option<i64>,
        #[serde(default)]
        pub timezone: Option<String>,
    }

    pub type APIResponse = UserSettingsResponse;
}

pub mod create_link_code {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub code: String,
        pub expires_at: i64,
    }
}

pub mod unlink_telegram {
    use super::*;

    pub type APIResponse = UserSettingsResponse;
}
