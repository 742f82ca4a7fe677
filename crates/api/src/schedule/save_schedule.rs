use crate::shared::usecase::{execute, UseCase};
use crate::{error::DaylineError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dayline_api_structs::save_schedule::*;
use dayline_api_structs::ScheduleResponse;
use dayline_domain::{Day, DaySchedule, TaskBlock, ID};
use dayline_infra::DaylineContext;
use std::collections::HashSet;

pub async fn save_schedule_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = SaveScheduleUseCase {
        user_id: user.id,
        date: body.0.date,
        tasks: body.0.tasks,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(ScheduleResponse::new(res.schedule, res.tasks)))
        .map_err(DaylineError::from)
}

/// Saving a schedule replaces the whole task set of that date. Every task
/// comes back with cleared sent flags, which is also how a user rearms
/// reminders for a day.
#[derive(Debug)]
pub struct SaveScheduleUseCase {
    pub user_id: ID,
    pub date: Day,
    pub tasks: Vec<TaskBlockRequest>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub schedule: DaySchedule,
    pub tasks: Vec<TaskBlock>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    DuplicateTaskId(String),
    TaskIdTaken(String),
}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::DuplicateTaskId(task_id) => Self::BadClientData(format!(
                "The task id: {}, appears more than once in the schedule.",
                task_id
            )),
            UseCaseError::TaskIdTaken(task_id) => Self::Conflict(format!(
                "The task id: {}, is already used on another day.",
                task_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SaveScheduleUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SaveSchedule";

    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.clone()) {
                return Err(UseCaseError::DuplicateTaskId(task.id.clone()));
            }
        }

        let existing_schedule = ctx
            .repos
            .schedules
            .find_by_user_and_date(&self.user_id, &self.date)
            .await;

        // Task ids are unique per user across all days, completing a task
        // later only takes the id
        for task in &self.tasks {
            if let Some(existing) = ctx
                .repos
                .tasks
                .find_by_external_id(&self.user_id, &task.id)
                .await
            {
                let same_day = existing_schedule
                    .as_ref()
                    .map(|s| s.id == existing.schedule_id)
                    .unwrap_or(false);
                if !same_day {
                    return Err(UseCaseError::TaskIdTaken(task.id.clone()));
                }
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let schedule = match existing_schedule {
            Some(mut schedule) => {
                schedule.updated = now;
                if ctx.repos.schedules.save(&schedule).await.is_err() {
                    return Err(UseCaseError::StorageError);
                }
                schedule
            }
            None => {
                let schedule = DaySchedule::new(self.user_id.clone(), self.date.clone(), now);
                if ctx.repos.schedules.insert(&schedule).await.is_err() {
                    return Err(UseCaseError::StorageError);
                }
                schedule
            }
        };

        let tasks: Vec<TaskBlock> = self
            .tasks
            .iter()
            .map(|task| {
                TaskBlock::new(
                    task.id.clone(),
                    schedule.id.clone(),
                    self.user_id.clone(),
                    task.start.clone(),
                    task.end.clone(),
                    task.description.clone(),
                )
            })
            .collect();

        if ctx
            .repos
            .tasks
            .replace_for_schedule(&schedule.id, &tasks)
            .await
            .is_err()
        {
            return Err(UseCaseError::StorageError);
        }

        let tasks = ctx.repos.tasks.find_by_schedule(&schedule.id).await;
        Ok(UseCaseRes { schedule, tasks })
    }
}
