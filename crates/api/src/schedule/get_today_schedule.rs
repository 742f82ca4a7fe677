use crate::{error::DaylineError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dayline_api_structs::get_today_schedule::*;
use dayline_domain::Day;
use dayline_infra::DaylineContext;

/// Resolves "today" in the timezone of the calling user before reading the
/// schedule, so a late evening in Oslo and an early morning in Kolkata see
/// different days.
pub async fn get_today_schedule_controller(
    http_req: HttpRequest,
    ctx: web::Data<DaylineContext>,
) -> Result<HttpResponse, DaylineError> {
    let user = protect_route(&http_req, &ctx).await?;
    let date = Day::from_datetime(&ctx.local_datetime(&user));

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
