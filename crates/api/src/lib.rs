mod auth;
mod error;
mod job_schedulers;
mod reminder;
mod schedule;
mod shared;
mod status;
mod user;
mod webhook;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use dayline_infra::DaylineContext;
use job_schedulers::{start_send_reminders_job, ReminderJob};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    auth::configure_routes(cfg);
    schedule::configure_routes(cfg);
    status::configure_routes(cfg);
    user::configure_routes(cfg);
    webhook::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    reminder_job: ReminderJob,
}

impl Application {
    pub async fn new(context: DaylineContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let reminder_job = start_send_reminders_job(context);

        Ok(Self {
            server,
            port,
            reminder_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: DaylineContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(|cfg| configure_server_api(cfg)))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Runs the server until it stops, then shuts the reminder loop down.
    /// Stopping waits for an in flight pass, so confirmed deliveries get
    /// their sent flags persisted before the process exits.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.reminder_job.stop().await;
        res
    }
}
