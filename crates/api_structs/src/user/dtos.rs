use dayline_domain::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsDTO {
    pub name: Option<String>,
    pub remind_before: bool,
    pub remind_on_start: bool,
    pub nudge_mid: bool,
    pub congratulate_on_end: bool,
    pub slot_duration_minutes: i64,
    pub timezone: String,
    pub telegram_linked: bool,
    pub telegram_username: Option<String>,
}

impl UserSettingsDTO {
    pub fn new(user: User) -> Self {
        Self {
            name: user.display_name,
            remind_before: user.settings.reminders.remind_before,
            remind_on_start: user.settings.reminders.remind_on_start,
            nudge_mid: user.settings.reminders.nudge_mid,
            congratulate_on_end: user.settings.reminders.congratulate_on_end,
            slot_duration_minutes: user.settings.slot_duration_minutes,
            timezone: user.settings.timezone,
            telegram_linked: user.telegram.is_some(),
            telegram_username: user.telegram.and_then(|t| t.username),
        }
    }
}
