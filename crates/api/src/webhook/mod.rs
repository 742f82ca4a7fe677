mod telegram;

use actix_web::web;
use telegram::telegram_webhook_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/webhook/telegram",
        web::post().to(telegram_webhook_controller),
    );
}
