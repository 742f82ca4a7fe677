use crate::{error::DaylineError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dayline_api_structs::get_schedule::*;
use dayline_infra::DaylineContext;

/// A date the user never saved anything for reads back as an empty
/// schedule, not as a 404.
pub async fn get_schedule_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let user = protect_route(&http_req, &ctx).await?;
    let date = path.into_inner().date;

    let res = match ctx
        .repos
        .schedules
        .find_by_user_and_date(&user.id, &date)
        .await
    {
        Some(schedule) => {
            let tasks = ctx.repos.tasks.find_by_schedule(&schedule.id).await;
            APIResponse::new(schedule, tasks)
        }
        None => APIResponse::empty(date),
    };

    Ok(HttpResponse::Ok().json(res))
}
