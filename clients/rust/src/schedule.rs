use crate::{APIResponse, BaseClient};
use dayline_api_structs::*;
use dayline_domain::Day;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ScheduleClient {
    base: Arc<BaseClient>,
}

pub struct SaveScheduleInput {
    pub date: Day,
    pub tasks: Vec<save_schedule::TaskBlockRequest>,
}

impl ScheduleClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn save(&self, input: SaveScheduleInput) -> APIResponse<save_schedule::APIResponse> {
        let body = save_schedule::RequestBody {
            date: input.date,
            tasks: input.tasks,
        };
        self.base
            .post(body, "schedule".into(), StatusCode::OK)
            .await
    }

    pub async fn get_today(&self) -> APIResponse<get_today_schedule::APIResponse> {
        self.base.get("schedule/today".into(), StatusCode::OK).await
    }

    pub async fn get_by_date(&self, date: &Day) -> APIResponse<get_schedule::APIResponse> {
        self.base
            .get(format!("schedule/{}", date), StatusCode::OK)
            .await
    }

    pub async fn complete_task(&self, task_id: &str) -> APIResponse<complete_task::APIResponse> {
        self.base
            .post(
                (),
                format!("schedule/tasks/{}/complete", task_id),
                StatusCode::OK,
            )
            .await
    }
}
