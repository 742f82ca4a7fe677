mod create_link_code;
mod get_settings;
mod unlink_telegram;
mod update_settings;

use actix_web::web;
use create_link_code::create_link_code_controller;
use get_settings::get_settings_controller;
use unlink_telegram::unlink_telegram_controller;
use update_settings::update_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/settings", web::get().to(get_settings_controller));
    cfg.route("/user/settings", web::put().to(update_settings_controller));
    cfg.route(
        "/user/telegram/link",
        web::post().to(create_link_code_controller),
    );
    cfg.route(
        "/user/telegram/unlink",
        web::post().to(unlink_telegram_controller),
    );
}
