use super::ITaskRepo;
use crate::repos::schedule::{IScheduleRepo, InMemoryScheduleRepo};
use crate::repos::shared::inmemory_repo::*;
use dayline_domain::{Day, ReminderClass, TaskBlock, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryTaskRepo {
    tasks: Mutex<Vec<TaskBlock>>,
    schedules: Arc<InMemoryScheduleRepo>,
}

impl InMemoryTaskRepo {
    pub fn new(schedules: Arc<InMemoryScheduleRepo>) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            schedules,
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for InMemoryTaskRepo {
    async fn replace_for_schedule(
        &self,
        schedule_id: &ID,
        tasks: &[TaskBlock],
    ) -> anyhow::Result<()> {
        find_and_delete_by(&self.tasks, |task| task.schedule_id == *schedule_id);
        for task in tasks {
            insert(task, &self.tasks);
        }
        Ok(())
    }

    async fn find_by_schedule(&self, schedule_id: &ID) -> Vec<TaskBlock> {
        let mut tasks = find_by(&self.tasks, |task| task.schedule_id == *schedule_id);
        tasks.sort_by_key(|task| task.start.minutes_of_day());
        tasks
    }

    async fn find_by_external_id(&self, user_id: &ID, external_id: &str) -> Option<TaskBlock> {
        find_by(&self.tasks, |task| {
            task.user_id == *user_id && task.external_id == external_id
        })
        .into_iter()
        .next()
    }

    async fn find_active_by_user_and_date(
        &self,
        user_id: &ID,
        date: &Day,
    ) -> anyhow::Result<Vec<TaskBlock>> {
        let schedule = match self.schedules.find_by_user_and_date(user_id, date).await {
            Some(schedule) => schedule,
            None => return Ok(Vec::new()),
        };
        let mut tasks = find_by(&self.tasks, |task| {
            task.schedule_id == schedule.id && !task.completed
        });
        tasks.sort_by_key(|task| task.start.minutes_of_day());
        Ok(tasks)
    }

    async fn mark_completed(&self, task_id: &ID, completed_at: i64) -> anyhow::Result<()> {
        update_many(
            &self.tasks,
            |task| task.id == *task_id,
            |task| {
                task.completed = true;
                if task.completed_at.is_none() {
                    task.completed_at = Some(completed_at);
                }
            },
        );
        Ok(())
    }

    async fn mark_reminder_sent(
        &self,
        task_id: &ID,
        class: ReminderClass,
    ) -> anyhow::Result<()> {
        update_many(
            &self.tasks,
            |task| task.id == *task_id,
            |task| task.sent.mark_sent(class),
        );
        Ok(())
    }
}
