use crate::dtos::{ScheduleDTO, TaskBlockDTO};
use dayline_domain::{Day, DaySchedule, TaskBlock, TimeOfDay};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub schedule: ScheduleDTO,
}

impl ScheduleResponse {
    pub fn new(schedule: DaySchedule, tasks: Vec<TaskBlock>) -> Self {
        Self {
            schedule: ScheduleDTO::new(schedule, tasks),
        }
    }

    pub fn empty(date: Day) -> Self {
        Self {
            schedule: ScheduleDTO::empty(date),
        }
    }
}

pub mod save_schedule {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TaskBlockRequest {
        pub id: String,
        pub start: TimeOfDay,
        pub end: TimeOfDay,
        pub description: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub date: Day,
        pub tasks: Vec<TaskBlockRequest>,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod get_schedule {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub date: Day,
    }

    pub type APIResponse = ScheduleResponse;
}

pub mod get_today_schedule {
    use super::*;

    pub type APIResponse = ScheduleResponse;
}

pub mod complete_task {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub task_id: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub task: TaskBlockDTO,
    }
}
