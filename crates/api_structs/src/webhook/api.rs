use serde::{Deserialize, Serialize};

// Inbound update from the telegram bot api. Field names are the wire
// names, so no camelCase renaming here. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramMessage {
    pub chat: TelegramChat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub from: Option<TelegramSender>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramChat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramSender {
    #[serde(default)]
    pub username: Option<String>,
}

pub mod telegram_webhook {
    use super::*;

    pub type RequestBody = TelegramUpdate;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub ok: bool,
    }
}
