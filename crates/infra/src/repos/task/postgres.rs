use super::ITaskRepo;
use dayline_domain::{Day, ReminderClass, SentFlags, TaskBlock, TimeOfDay, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::warn;

pub struct PostgresTaskRepo {
    pool: PgPool,
}

impl PostgresTaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRaw {
    task_uid: Uuid,
    external_id: String,
    schedule_uid: Uuid,
    user_uid: Uuid,
    start_time: String,
    end_time: String,
    description: String,
    completed: bool,
    completed_at: Option<i64>,
    sent_before: bool,
    sent_on_start: bool,
    sent_mid: bool,
    sent_on_end: bool,
}

impl TryFrom<TaskRaw> for TaskBlock {
    type Error = anyhow::Error;

    fn try_from(e: TaskRaw) -> anyhow::Result<Self> {
        let start = e.start_time.parse::<TimeOfDay>()?;
        let end = e.end_time.parse::<TimeOfDay>()?;
        Ok(Self {
            id: e.task_uid.into(),
            external_id: e.external_id,
            schedule_id: e.schedule_uid.into(),
            user_id: e.user_uid.into(),
            start,
            end,
            description: e.description,
            completed: e.completed,
            completed_at: e.completed_at,
            sent: SentFlags {
                sent_before: e.sent_before,
                sent_on_start: e.sent_on_start,
                sent_mid: e.sent_mid,
                sent_on_end: e.sent_on_end,
            },
        })
    }
}

fn to_tasks(raw: Vec<TaskRaw>) -> Vec<TaskBlock> {
    raw.into_iter()
        .filter_map(|e| match TaskBlock::try_from(e) {
            Ok(task) => Some(task),
            Err(e) => {
                warn!("Skipping task with malformed stored times. Error: {:?}", e);
                None
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl ITaskRepo for PostgresTaskRepo {
    async fn replace_for_schedule(
        &self,
        schedule_id: &ID,
        tasks: &[TaskBlock],
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule_id.inner_ref())
        .execute(&mut tx)
        .await?;
        for task in tasks {
            sqlx::query(
                r#"
            INSERT INTO tasks(task_uid, external_id, schedule_uid, user_uid, start_time, end_time, description, completed, completed_at, sent_before, sent_on_start, sent_mid, sent_on_end)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
            )
            .bind(task.id.inner_ref())
            .bind(&task.external_id)
            .bind(task.schedule_id.inner_ref())
            .bind(task.user_id.inner_ref())
            .bind(task.start.to_string())
            .bind(task.end.to_string())
            .bind(&task.description)
            .bind(task.completed)
            .bind(task.completed_at)
            .bind(task.sent.sent_before)
            .bind(task.sent.sent_on_start)
            .bind(task.sent.sent_mid)
            .bind(task.sent.sent_on_end)
            .execute(&mut tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_schedule(&self, schedule_id: &ID) -> Vec<TaskBlock> {
        // start_time is zero padded HH:MM so text order is chronological
        let tasks: Vec<TaskRaw> = sqlx::query_as(
            r#"
            SELECT * FROM tasks
            WHERE schedule_uid = $1
            ORDER BY start_time
            "#,
        )
        .bind(schedule_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        to_tasks(tasks)
    }

    async fn find_by_external_id(&self, user_id: &ID, external_id: &str) -> Option<TaskBlock> {
        let task: TaskRaw = match sqlx::query_as(
            r#"
            SELECT * FROM tasks
            WHERE user_uid = $1 AND external_id = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(external_id)
        .fetch_one(&self.pool)
        .await
        {
            Ok(task) => task,
            Err(_) => return None,
        };
        TaskBlock::try_from(task).ok()
    }

    async fn find_active_by_user_and_date(
        &self,
        user_id: &ID,
        date: &Day,
    ) -> anyhow::Result<Vec<TaskBlock>> {
        let tasks: Vec<TaskRaw> = sqlx::query_as(
            r#"
            SELECT t.* FROM tasks AS t
            INNER JOIN schedules AS s ON s.schedule_uid = t.schedule_uid
            WHERE t.user_uid = $1 AND s.date = $2 AND NOT t.completed
            ORDER BY t.start_time
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(date.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(to_tasks(tasks))
    }

    async fn mark_completed(&self, task_id: &ID, completed_at: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET completed = TRUE,
            completed_at = COALESCE(completed_at, $2)
            WHERE task_uid = $1
            "#,
        )
        .bind(task_id.inner_ref())
        .bind(completed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_reminder_sent(
        &self,
        task_id: &ID,
        class: ReminderClass,
    ) -> anyhow::Result<()> {
        let sql = match class {
            ReminderClass::Before => "UPDATE tasks SET sent_before = TRUE WHERE task_uid = $1",
            ReminderClass::OnStart => "UPDATE tasks SET sent_on_start = TRUE WHERE task_uid = $1",
            ReminderClass::Mid => "UPDATE tasks SET sent_mid = TRUE WHERE task_uid = $1",
            ReminderClass::OnEnd => "UPDATE tasks SET sent_on_end = TRUE WHERE task_uid = $1",
        };
        sqlx::query(sql)
            .bind(task_id.inner_ref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
