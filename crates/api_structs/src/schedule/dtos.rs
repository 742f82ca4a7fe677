use dayline_domain::{Day, DaySchedule, TaskBlock, TimeOfDay};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBlockDTO {
    /// The client supplied task id, not the internal one
    pub id: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub description: String,
    pub completed: bool,
    pub completed_at: Option<i64>,
}

impl TaskBlockDTO {
    pub fn new(task: TaskBlock) -> Self {
        Self {
            id: task.external_id,
            start: task.start,
            end: task.end,
            description: task.description,
            completed: task.completed,
            completed_at: task.completed_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDTO {
    pub date: Day,
    pub created: Option<i64>,
    pub updated: Option<i64>,
    pub tasks: Vec<TaskBlockDTO>,
}

impl ScheduleDTO {
    pub fn new(schedule: DaySchedule, tasks: Vec<TaskBlock>) -> Self {
        Self {
            date: schedule.date,
            created: Some(schedule.created),
            updated: Some(schedule.updated),
            tasks: tasks.into_iter().map(TaskBlockDTO::new).collect(),
        }
    }

    /// A date the user has not saved anything for yet
    pub fn empty(date: Day) -> Self {
        Self {
            date,
            created: None,
            updated: None,
            tasks: Vec::new(),
        }
    }
}
