use crate::shared::usecase::UseCase;
use actix_web::rt::time::sleep;
use chrono::Timelike;
use dayline_domain::{Day, ReminderClass, TaskBlock, User};
use dayline_infra::{escape_html, DaylineContext};
use std::time::Duration;
use tracing::{error, warn};

/// One notification pass over every user with a linked telegram chat.
///
/// For each user the pass resolves the current wall clock minute and date
/// in that users timezone, matches the active tasks of the day against the
/// reminder windows and delivers whatever is due. A sent flag is only
/// persisted after telegram confirmed the delivery, so a failed delivery
/// is picked up again on the next pass.
///
/// A failing user, task or delivery never stops the pass, only failing to
/// list the users does.
#[derive(Debug)]
pub struct SendRemindersUseCase;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DeliveryCount {
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
pub struct UseCaseRes {
    pub before: DeliveryCount,
    pub on_start: DeliveryCount,
    pub mid: DeliveryCount,
    pub on_end: DeliveryCount,
}

impl UseCaseRes {
    fn count_mut(&mut self, class: ReminderClass) -> &mut DeliveryCount {
        match class {
            ReminderClass::Before => &mut self.before,
            ReminderClass::OnStart => &mut self.on_start,
            ReminderClass::Mid => &mut self.mid,
            ReminderClass::OnEnd => &mut self.on_end,
        }
    }

    pub fn total_sent(&self) -> usize {
        self.before.sent + self.on_start.sent + self.mid.sent + self.on_end.sent
    }

    pub fn total_failed(&self) -> usize {
        self.before.failed + self.on_start.failed + self.mid.failed + self.on_end.failed
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &DaylineContext) -> Result<Self::Response, Self::Error> {
        let users = match ctx.repos.users.find_with_telegram_linked().await {
            Ok(users) => users,
            Err(e) => {
                error!("Unable to list users with telegram linked. Error: {:?}", e);
                return Err(UseCaseError::StorageError);
            }
        };

        let mut stats = UseCaseRes::default();
        for user in users {
            if let Err(e) = send_user_reminders(&user, &mut stats, ctx).await {
                error!(
                    "Skipping remaining reminders of user: {}. Error: {:?}",
                    user.id, e
                );
            }
        }
        Ok(stats)
    }
}

async fn send_user_reminders(
    user: &User,
    stats: &mut UseCaseRes,
    ctx: &DaylineContext,
) -> anyhow::Result<()> {
    let chat_id = match &user.telegram {
        Some(link) => link.chat_id.clone(),
        None => return Ok(()),
    };

    let now = ctx.local_datetime(user);
    let date = Day::from_datetime(&now);
    let now_minutes = (now.hour() * 60 + now.minute()) as i64;

    let tasks = ctx
        .repos
        .tasks
        .find_active_by_user_and_date(&user.id, &date)
        .await?;

    for task in tasks {
        for class in task.due_reminders(now_minutes, &user.settings.reminders) {
            let text = reminder_text(&task, class);
            if !deliver(&chat_id, &text, ctx).await {
                warn!(
                    "Giving up on {:?} reminder of task: {} for user: {}.",
                    class, task.id, user.id
                );
                stats.count_mut(class).failed += 1;
                continue;
            }
            match ctx.repos.tasks.mark_reminder_sent(&task.id, class).await {
                Ok(()) => stats.count_mut(class).sent += 1,
                Err(e) => {
                    error!(
                        "Unable to persist {:?} sent flag of task: {}. Error: {:?}",
                        class, task.id, e
                    );
                    stats.count_mut(class).failed += 1;
                }
            }
        }
    }
    Ok(())
}

/// Delivers one text with a bounded number of attempts. Each attempt is
/// already capped by the messenger timeout, the pause between attempts
/// comes from the config.
async fn deliver(chat_id: &str, text: &str, ctx: &DaylineContext) -> bool {
    let max_attempts = ctx.config.delivery_max_attempts.max(1);
    for attempt in 1..=max_attempts {
        if ctx.messenger.notify(chat_id, text).await {
            return true;
        }
        if attempt < max_attempts {
            warn!(
                "Delivery attempt {}/{} to chat: {} failed, retrying.",
                attempt, max_attempts, chat_id
            );
            sleep(Duration::from_millis(ctx.config.delivery_retry_backoff)).await;
        }
    }
    false
}

/// The telegram text of one reminder. Short lines in telegrams HTML parse
/// mode, the headline tells the user which moment this is about.
pub fn reminder_text(task: &TaskBlock, class: ReminderClass) -> String {
    let description = escape_html(&task.description);
    match class {
        ReminderClass::Before => format!(
            "<b>Up next:</b> {}\n{} - {}",
            description, task.start, task.end
        ),
        ReminderClass::OnStart => format!(
            "<b>Starting now:</b> {}\nPlanned until {}",
            description, task.end
        ),
        ReminderClass::Mid => format!("<b>Halfway there:</b> {}", description),
        ReminderClass::OnEnd => format!("<b>Well done!</b> {} is wrapped up.", description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayline_domain::{DaySchedule, TelegramLink};
    use dayline_infra::{ISys, InMemoryMessenger};
    use std::sync::Arc;

    struct StaticSys {
        millis: i64,
    }

    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.millis
        }
    }

    /// Millis timestamp of the given wall clock time on 2021-03-01, UTC
    fn utc_millis(hours: i64, minutes: i64) -> i64 {
        1_614_556_800_000 + (hours * 60 + minutes) * 60_000
    }

    fn ctx_at(hours: i64, minutes: i64) -> (DaylineContext, Arc<InMemoryMessenger>) {
        let mut ctx = DaylineContext::create_inmemory();
        let messenger = Arc::new(InMemoryMessenger::new());
        ctx.messenger = messenger.clone();
        ctx.sys = Arc::new(StaticSys {
            millis: utc_millis(hours, minutes),
        });
        ctx.config.delivery_retry_backoff = 0;
        (ctx, messenger)
    }

    async fn linked_user(ctx: &DaylineContext, username: &str, chat_id: &str) -> User {
        let mut user = User::new(username.into(), "hash".into(), None, 0);
        user.settings.timezone = "UTC".into();
        user.telegram = Some(TelegramLink {
            chat_id: chat_id.into(),
            username: None,
        });
        ctx.repos.users.insert(&user).await.expect("To insert user");
        user
    }

    async fn plan_tasks(
        ctx: &DaylineContext,
        user: &User,
        specs: &[(&str, &str, &str)],
    ) -> Vec<TaskBlock> {
        let schedule = DaySchedule::new(user.id.clone(), "2021-03-01".parse().unwrap(), 0);
        ctx.repos
            .schedules
            .insert(&schedule)
            .await
            .expect("To insert schedule");
        let tasks: Vec<TaskBlock> = specs
            .iter()
            .map(|(external_id, start, end)| {
                TaskBlock::new(
                    (*external_id).into(),
                    schedule.id.clone(),
                    user.id.clone(),
                    start.parse().unwrap(),
                    end.parse().unwrap(),
                    format!("Task {}", external_id),
                )
            })
            .collect();
        ctx.repos
            .tasks
            .replace_for_schedule(&schedule.id, &tasks)
            .await
            .expect("To insert tasks");
        tasks
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_sends_a_heads_up_before_the_start() {
        let (ctx, messenger) = ctx_at(8, 50);
        let user = linked_user(&ctx, "lena", "chat-1").await;
        plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;

        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(res.before, DeliveryCount { sent: 1, failed: 0 });
        assert_eq!(res.total_sent(), 1);
        let sent = messenger.sent_to("chat-1");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Up next"));
        assert!(sent[0].contains("Task t-1"));
        assert!(sent[0].contains("09:00 - 10:00"));
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_never_fires_the_same_class_twice() {
        let (ctx, messenger) = ctx_at(8, 50);
        let user = linked_user(&ctx, "lena", "chat-1").await;
        plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;

        SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");
        let second = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(second.total_sent(), 0);
        assert_eq!(messenger.sent_to("chat-1").len(), 1);
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_walks_a_task_through_the_morning() {
        let (mut ctx, messenger) = ctx_at(8, 50);
        let user = linked_user(&ctx, "lena", "chat-1").await;
        plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;

        // 08:50, the heads up goes out
        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");
        assert_eq!(res.before.sent, 1);
        assert_eq!(messenger.sent_to("chat-1").len(), 1);

        // 08:51, still inside the heads up window but already sent
        ctx.sys = Arc::new(StaticSys {
            millis: utc_millis(8, 51),
        });
        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");
        assert_eq!(res.total_sent(), 0);
        assert_eq!(messenger.sent_to("chat-1").len(), 1);

        // 09:00, the start reminder goes out
        ctx.sys = Arc::new(StaticSys {
            millis: utc_millis(9, 0),
        });
        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");
        assert_eq!(res.on_start.sent, 1);
        let sent = messenger.sent_to("chat-1");
        assert_eq!(sent.len(), 2);
        assert!(sent[1].contains("Starting now"));
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_leaves_the_flag_unset_when_delivery_fails() {
        let (ctx, messenger) = ctx_at(8, 50);
        let user = linked_user(&ctx, "lena", "chat-1").await;
        plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;

        messenger.set_failing(true);
        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");
        assert_eq!(res.before, DeliveryCount { sent: 0, failed: 1 });
        assert!(messenger.sent_to("chat-1").is_empty());

        // The next pass picks the reminder up again
        messenger.set_failing(false);
        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");
        assert_eq!(res.before, DeliveryCount { sent: 1, failed: 0 });
        assert_eq!(messenger.sent_to("chat-1").len(), 1);
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_retries_a_failing_delivery_before_giving_up() {
        let (ctx, messenger) = ctx_at(8, 50);
        let user = linked_user(&ctx, "lena", "chat-1").await;
        plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;

        messenger.set_failing(true);
        SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(messenger.attempts(), ctx.config.delivery_max_attempts as usize);
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_only_considers_users_with_telegram_linked() {
        let (ctx, messenger) = ctx_at(8, 50);
        let linked = linked_user(&ctx, "lena", "chat-1").await;
        plan_tasks(&ctx, &linked, &[("t-1", "09:00", "10:00")]).await;

        let mut unlinked = User::new("maria".into(), "hash".into(), None, 0);
        unlinked.settings.timezone = "UTC".into();
        ctx.repos
            .users
            .insert(&unlinked)
            .await
            .expect("To insert user");
        plan_tasks(&ctx, &unlinked, &[("t-2", "09:00", "10:00")]).await;

        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(res.total_sent(), 1);
        assert_eq!(messenger.sent_messages().len(), 1);
        assert_eq!(messenger.sent_to("chat-1").len(), 1);
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_covers_every_linked_user_in_one_pass() {
        let (ctx, messenger) = ctx_at(8, 50);
        let lena = linked_user(&ctx, "lena", "chat-1").await;
        plan_tasks(&ctx, &lena, &[("t-1", "09:00", "10:00")]).await;
        let maria = linked_user(&ctx, "maria", "chat-2").await;
        plan_tasks(&ctx, &maria, &[("t-2", "09:00", "10:00")]).await;

        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(res.before.sent, 2);
        assert_eq!(messenger.sent_to("chat-1").len(), 1);
        assert_eq!(messenger.sent_to("chat-2").len(), 1);
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_resolves_now_and_today_in_the_user_timezone() {
        // 07:50 UTC is 08:50 in Oslo during winter time
        let (ctx, messenger) = ctx_at(7, 50);
        let mut user = User::new("lena".into(), "hash".into(), None, 0);
        user.settings.timezone = "Europe/Oslo".into();
        user.telegram = Some(TelegramLink {
            chat_id: "chat-1".into(),
            username: None,
        });
        ctx.repos.users.insert(&user).await.expect("To insert user");
        plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;

        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(res.before.sent, 1);
        assert_eq!(messenger.sent_to("chat-1").len(), 1);
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_falls_back_to_the_default_timezone() {
        // 03:20 UTC is 08:50 in Asia/Kolkata, the default fallback
        let (ctx, messenger) = ctx_at(3, 20);
        let mut user = User::new("lena".into(), "hash".into(), None, 0);
        user.settings.timezone = "Mars/Olympus_Mons".into();
        user.telegram = Some(TelegramLink {
            chat_id: "chat-1".into(),
            username: None,
        });
        ctx.repos.users.insert(&user).await.expect("To insert user");
        plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;

        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(res.before.sent, 1);
        assert_eq!(messenger.sent_to("chat-1").len(), 1);
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_delivers_every_due_class_of_a_zero_length_task() {
        let (ctx, messenger) = ctx_at(10, 0);
        let user = linked_user(&ctx, "lena", "chat-1").await;
        plan_tasks(&ctx, &user, &[("t-1", "10:00", "10:00")]).await;

        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        // Start, midpoint and end all collapse onto 10:00
        assert_eq!(res.on_start.sent, 1);
        assert_eq!(res.mid.sent, 1);
        assert_eq!(res.on_end.sent, 1);
        assert_eq!(res.before.sent, 0);
        assert_eq!(messenger.sent_to("chat-1").len(), 3);
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_skips_completed_tasks() {
        let (ctx, messenger) = ctx_at(8, 50);
        let user = linked_user(&ctx, "lena", "chat-1").await;
        let tasks = plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;
        ctx.repos
            .tasks
            .mark_completed(&tasks[0].id, utc_millis(8, 45))
            .await
            .expect("To mark completed");

        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(res.total_sent(), 0);
        assert!(messenger.sent_to("chat-1").is_empty());
    }

    #[actix_web::main]
    #[test]
    #[serial_test::serial]
    async fn it_honors_disabled_reminder_classes() {
        let (ctx, messenger) = ctx_at(8, 50);
        let mut user = User::new("lena".into(), "hash".into(), None, 0);
        user.settings.timezone = "UTC".into();
        user.settings.reminders.remind_before = false;
        user.telegram = Some(TelegramLink {
            chat_id: "chat-1".into(),
            username: None,
        });
        ctx.repos.users.insert(&user).await.expect("To insert user");
        plan_tasks(&ctx, &user, &[("t-1", "09:00", "10:00")]).await;

        let res = SendRemindersUseCase
            .execute(&ctx)
            .await
            .expect("To run the pass");

        assert_eq!(res.total_sent(), 0);
        assert!(messenger.sent_to("chat-1").is_empty());
    }

    #[test]
    fn it_renders_the_reminder_texts() {
        let task = TaskBlock::new(
            "t-1".into(),
            Default::default(),
            Default::default(),
            "09:00".parse().unwrap(),
            "10:15".parse().unwrap(),
            "Review <plans> & notes".into(),
        );

        assert_eq!(
            reminder_text(&task, ReminderClass::Before),
            "<b>Up next:</b> Review &lt;plans&gt; &amp; notes\n09:00 - 10:15"
        );
        assert_eq!(
            reminder_text(&task, ReminderClass::OnStart),
            "<b>Starting now:</b> Review &lt;plans&gt; &amp; notes\nPlanned until 10:15"
        );
        assert_eq!(
            reminder_text(&task, ReminderClass::Mid),
            "<b>Halfway there:</b> Review &lt;plans&gt; &amp; notes"
        );
        assert_eq!(
            reminder_text(&task, ReminderClass::OnEnd),
            "<b>Well done!</b> Review &lt;plans&gt; &amp; notes is wrapped up."
        );
    }
}
