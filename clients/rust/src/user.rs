use crate::{APIResponse, BaseClient};
use dayline_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

#[derive(Default)]
pub struct UpdateSettingsInput {
    pub name: Option<String>,
    pub remind_before: Option<bool>,
    pub remind_on_start: Option<bool>,
    pub nudge_mid: Option<bool>,
    pub congratulate_on_end: Option<bool>,
    pub slot_duration_minutes: Option<i64>,
    pub timezone: Option<String>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_settings(&self) -> APIResponse<get_settings::APIResponse> {
        self.base.get("user/settings".into(), StatusCode::OK).await
    }

    pub async fn update_settings(
        &self,
        input: UpdateSettingsInput,
    ) -> APIResponse<update_settings::APIResponse> {
        let body = update_settings::RequestBody {
            name: input.name,
            remind_before: input.remind_before,
            remind_on_start: input.remind_on_start,
            nudge_mid: input.nudge_mid,
            congratulate_on_end: input.congratulate_on_end,
            slot_duration_minutes: input.slot_duration_minutes,
            timezone: input.timezone,
        };
        self.base
            .put(body, "user/settings".into(), StatusCode::OK)
            .await
    }

    pub async fn create_link_code(&self) -> APIResponse<create_link_code::APIResponse> {
        self.base
            .post((), "user/telegram/link".into(), StatusCode::OK)
            .await
    }

    pub async fn unlink_telegram(&self) -> APIResponse<unlink_telegram::APIResponse> {
        self.base
            .post((), "user/telegram/unlink".into(), StatusCode::OK)
            .await
    }
}
