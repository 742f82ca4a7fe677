use crate::{
    reminder::ReminderSettings,
    shared::entity::{Entity, ID},
};
use chrono_tz::Tz;

/// Timezone assumed for users that have not picked one themselves
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    /// Unique login name
    pub username: String,
    /// Argon2 hash of the password, never the password itself
    pub password_hash: String,
    pub display_name: Option<String>,
    pub settings: UserSettings,
    /// Present once the user has connected a telegram chat
    pub telegram: Option<TelegramLink>,
    pub created: i64,
    pub updated: i64,
}

impl User {
    pub fn new(
        username: String,
        password_hash: String,
        display_name: Option<String>,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            username,
            password_hash,
            display_name,
            settings: Default::default(),
            telegram: None,
            created: now,
            updated: now,
        }
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[derive(Debug, Clone)]
pub struct UserSettings {
    pub reminders: ReminderSettings,
    /// Preferred length of a planning slot in the frontend, minutes
    pub slot_duration_minutes: i64,
    /// IANA timezone name, stored as the client sent it
    pub timezone: String,
}

impl UserSettings {
    /// The parsed timezone, `None` when the stored name is not a valid
    /// IANA timezone. Callers decide how to fall back.
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse().ok()
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            reminders: Default::default(),
            slot_duration_minutes: 60,
            timezone: DEFAULT_TIMEZONE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramLink {
    /// Chat id as telegram reports it, kept as a string
    pub chat_id: String,
    pub username: Option<String>,
}
