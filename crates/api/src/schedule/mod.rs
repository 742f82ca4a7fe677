mod complete_task;
mod get_schedule;
mod get_today_schedule;
mod save_schedule;

use actix_web::web;
use complete_task::complete_task_controller;
use get_schedule::get_schedule_controller;
use get_today_schedule::get_today_schedule_controller;
use save_schedule::save_schedule_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedule", web::post().to(save_schedule_controller));
    // The today route has to be registered before the date route, otherwise
    // "today" would be parsed as a date
    cfg.route(
        "/schedule/today",
        web::get().to(get_today_schedule_controller),
    );
    cfg.route(
        "/schedule/tasks/{task_id}/complete",
        web::post().to(complete_task_controller),
    );
    cfg.route("/schedule/{date}", web::get().to(get_schedule_controller));
}
