use crate::shared::usecase::{execute, UseCase};
use crate::{error::DaylineError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dayline_api_structs::complete_task::*;
use dayline_api_structs::dtos::TaskBlockDTO;
use dayline_domain::{TaskBlock, ID};
use dayline_infra::DaylineContext;

pub async fn complete_task_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = CompleteTaskUseCase {
        user_id: user.id,
        task_id: path.into_inner().task_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                task: TaskBlockDTO::new(res.task),
            })
        })
        .map_err(DaylineError::from)
}

/// Completing a task retires it from reminder matching. Completing it a
/// second time keeps the first completion timestamp.
#[derive(Debug)]
pub struct CompleteTaskUseCase {
    pub user_id: ID,
    /// The client supplied task id, not the internal one
    pub task_id: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub task: TaskBlock,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    NotFound(String),
}

impl From<UseCaseError> for DaylineError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::NotFound(task_id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", task_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteTaskUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteTask";

    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let task = match ctx
            .repos
            .tasks
            .find_by_external_id(&self.user_id, &self.task_id)
            .await
        {
            Some(task) => task,
            None => return Err(UseCaseError::NotFound(self.task_id.clone())),
        };

        let now = ctx.sys.get_timestamp_millis();
        if ctx
            .repos
            .tasks
            .mark_completed(&task.id, now)
            .await
            .is_err()
        {
            return Err(UseCaseError::StorageError);
        }

        match ctx
            .repos
            .tasks
            .find_by_external_id(&self.user_id, &self.task_id)
            .await
        {
            Some(task) => Ok(UseCaseRes { task }),
            None => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayline_domain::{DaySchedule, User};

    async fn setup_task(ctx: &DaylineContext) -> (User, TaskBlock) {
        let user = User::new("lena".into(), "hash".into(), None, 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");
        let schedule = DaySchedule::new(user.id.clone(), "2021-03-01".parse().unwrap(), 0);
        ctx.repos
            .schedules
            .insert(&schedule)
            .await
            .expect("To insert schedule");
        let task = TaskBlock::new(
            "t-1".into(),
            schedule.id.clone(),
            user.id.clone(),
            "09:00".parse().unwrap(),
            "10:00".parse().unwrap(),
            "Morning review".into(),
        );
        ctx.repos
            .tasks
            .replace_for_schedule(&schedule.id, &[task.clone()])
            .await
            .expect("To insert task");
        (user, task)
    }

    #[actix_web::main]
    #[test]
    async fn it_completes_a_task_and_stamps_the_time() {
        let ctx = DaylineContext::create_inmemory();
        let (user, _) = setup_task(&ctx).await;

        let mut usecase = CompleteTaskUseCase {
            user_id: user.id.clone(),
            task_id: "t-1".into(),
        };
        let res = usecase.execute(&ctx).await.expect("To complete task");

        assert!(res.task.completed);
        assert!(res.task.completed_at.is_some());
        let active = ctx
            .repos
            .tasks
            .find_active_by_user_and_date(&user.id, &"2021-03-01".parse().unwrap())
            .await
            .expect("To query active tasks");
        assert!(active.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn it_keeps_the_first_completion_timestamp() {
        let ctx = DaylineContext::create_inmemory();
        let (user, task) = setup_task(&ctx).await;

        ctx.repos
            .tasks
            .mark_completed(&task.id, 500)
            .await
            .expect("To mark completed");

        let mut usecase = CompleteTaskUseCase {
            user_id: user.id,
            task_id: "t-1".into(),
        };
        let res = usecase.execute(&ctx).await.expect("To complete task");
        assert_eq!(res.task.completed_at, Some(500));
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_unknown_task_ids() {
        let ctx = DaylineContext::create_inmemory();
        let (user, _) = setup_task(&ctx).await;

        let mut usecase = CompleteTaskUseCase {
            user_id: user.id,
            task_id: "t-unknown".into(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound("t-unknown".into())
        );
    }

    #[actix_web::main]
    #[test]
    async fn it_does_not_complete_tasks_of_other_users() {
        let ctx = DaylineContext::create_inmemory();
        setup_task(&ctx).await;

        let other = User::new("maria".into(), "hash".into(), None, 0);
        ctx.repos
            .users
            .insert(&other)
            .await
            .expect("To insert user");

        let mut usecase = CompleteTaskUseCase {
            user_id: other.id,
            task_id: "t-1".into(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound("t-1".into())
        );
    }
}
