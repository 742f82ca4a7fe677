mod login;
mod logout;
mod refresh_token;
mod signup;

use actix_web::web;
use login::login_controller;
use logout::logout_controller;
use refresh_token::refresh_token_controller;
use signup::signup_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/signup", web::post().to(signup_controller));
    cfg.route("/auth/login", web::post().to(login_controller));
    cfg.route(
        "/auth/token/refresh",
        web::post().to(refresh_token_controller),
    );
    cfg.route("/auth/logout", web::post().to(logout_controller));
}
