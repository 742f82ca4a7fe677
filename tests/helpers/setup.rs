use dayline_api::Application;
use dayline_infra::{Config, DaylineContext, InMemoryMessenger};
use dayline_sdk::DaylineSDK;
use std::sync::Arc;

pub struct TestApp {
    pub config: Config,
    /// Handle to the messenger the server delivers telegram texts to
    pub messenger: Arc<InMemoryMessenger>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, DaylineSDK, String) {
    let mut ctx = DaylineContext::create_inmemory();
    ctx.config.port = 0; // Random port
    // The suite drives the API directly, the reminder loop should stay
    // quiet while a test runs
    ctx.config.reminder_interval_secs = 60 * 60;
    let messenger = Arc::new(InMemoryMessenger::new());
    ctx.messenger = messenger.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config, messenger };
    let sdk = DaylineSDK::new(address.clone());
    (app, sdk, address)
}
