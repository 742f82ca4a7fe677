mod inmemory;
mod postgres;

use dayline_domain::{Day, ReminderClass, TaskBlock, ID};
pub use inmemory::InMemoryTaskRepo;
pub use postgres::PostgresTaskRepo;

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    /// Replace every task of the given schedule with the given tasks, in one
    /// transaction. This is how saving a schedule resets the sent flags.
    async fn replace_for_schedule(
        &self,
        schedule_id: &ID,
        tasks: &[TaskBlock],
    ) -> anyhow::Result<()>;
    /// Tasks of one schedule ordered by start time
    async fn find_by_schedule(&self, schedule_id: &ID) -> Vec<TaskBlock>;
    async fn find_by_external_id(&self, user_id: &ID, external_id: &str) -> Option<TaskBlock>;
    /// Not yet completed tasks of the user on the given date, ordered by
    /// start time. Fallible so the notification pass can tell an empty day
    /// apart from storage being down.
    async fn find_active_by_user_and_date(
        &self,
        user_id: &ID,
        date: &Day,
    ) -> anyhow::Result<Vec<TaskBlock>>;
    async fn mark_completed(&self, task_id: &ID, completed_at: i64) -> anyhow::Result<()>;
    async fn mark_reminder_sent(&self, task_id: &ID, class: ReminderClass)
        -> anyhow::Result<()>;
}
