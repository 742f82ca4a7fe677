use crate::reminder::send_reminders::SendRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::sleep;
use dayline_infra::{Config, DaylineContext};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// How long to pause after a finished pass before starting the next one.
/// The pause is measured from completion, so a slow pass never overlaps
/// the next one. Once too many passes in a row have failed the loop backs
/// off to the longer cooldown until a pass succeeds again.
pub fn next_pass_delay(consecutive_failures: usize, config: &Config) -> Duration {
    if consecutive_failures >= config.reminder_failure_threshold {
        Duration::from_secs(config.reminder_cooldown_secs)
    } else {
        Duration::from_secs(config.reminder_interval_secs)
    }
}

/// Handle of the background reminder loop. Stopping waits for an in flight
/// pass to finish its writes before returning.
pub struct ReminderJob {
    shutdown: watch::Sender<bool>,
    handle: actix_web::rt::task::JoinHandle<()>,
}

impl ReminderJob {
    pub async fn stop(self) {
        // The loop may already be gone, nothing to signal then
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            error!("Reminder job did not shut down cleanly. Error: {:?}", e);
        }
    }
}

pub fn start_send_reminders_job(ctx: DaylineContext) -> ReminderJob {
    let (shutdown, mut shutdown_recv) = watch::channel(false);
    let handle = actix_web::rt::spawn(async move {
        let mut consecutive_failures = 0;
        loop {
            match execute(SendRemindersUseCase, &ctx).await {
                Ok(stats) => {
                    consecutive_failures = 0;
                    if stats.total_sent() > 0 || stats.total_failed() > 0 {
                        info!(
                            "Reminder pass done. Sent: {}. Failed: {}.",
                            stats.total_sent(),
                            stats.total_failed()
                        );
                    }
                }
                Err(_) => {
                    consecutive_failures += 1;
                    if consecutive_failures >= ctx.config.reminder_failure_threshold {
                        error!(
                            "{} reminder passes failed in a row, backing off.",
                            consecutive_failures
                        );
                    }
                }
            }

            let delay = next_pass_delay(consecutive_failures, &ctx.config);
            tokio::select! {
                _ = sleep(delay) => {}
                res = shutdown_recv.changed() => {
                    // A dropped sender also means there is nobody left to
                    // keep the loop alive
                    if res.is_err() || *shutdown_recv.borrow() {
                        info!("Reminder job shutting down.");
                        break;
                    }
                }
            }
        }
    });
    ReminderJob { shutdown, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayline_domain::{DaySchedule, TaskBlock, TelegramLink, User};
    use dayline_infra::{ISys, InMemoryMessenger};
    use std::sync::Arc;

    #[test]
    fn it_spaces_passes_by_the_interval_until_the_threshold() {
        let mut config = Config::new();
        config.reminder_interval_secs = 60;
        config.reminder_failure_threshold = 5;
        config.reminder_cooldown_secs = 300;

        assert_eq!(next_pass_delay(0, &config), Duration::from_secs(60));
        assert_eq!(next_pass_delay(1, &config), Duration::from_secs(60));
        assert_eq!(next_pass_delay(4, &config), Duration::from_secs(60));
        assert_eq!(next_pass_delay(5, &config), Duration::from_secs(300));
        assert_eq!(next_pass_delay(9, &config), Duration::from_secs(300));
    }

    struct StaticSys {
        millis: i64,
    }

    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.millis
        }
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_runs_a_pass_and_stops_cleanly() {
        let mut ctx = DaylineContext::create_inmemory();
        let messenger = Arc::new(InMemoryMessenger::new());
        ctx.messenger = messenger.clone();
        // 08:50 on 2021-03-01, UTC
        ctx.sys = Arc::new(StaticSys {
            millis: 1_614_588_600_000,
        });
        // Keep the loop from running a second pass during the test
        ctx.config.reminder_interval_secs = 3600;

        let mut user = User::new("lena".into(), "hash".into(), None, 0);
        user.settings.timezone = "UTC".into();
        user.telegram = Some(TelegramLink {
            chat_id: "chat-1".into(),
            username: None,
        });
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
            .replace_for_schedule(&schedule.id, &[task])
            .await
            .expect("To insert task");

        let job = start_send_reminders_job(ctx);
        sleep(Duration::from_millis(50)).await;
        job.stop().await;

        let sent = messenger.sent_to("chat-1");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Up next"));
    }
}
