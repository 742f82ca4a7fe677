use super::IScheduleRepo;
use crate::repos::shared::inmemory_repo::*;
use dayline_domain::{Day, DaySchedule, ID};

pub struct InMemoryScheduleRepo {
    schedules: std::sync::Mutex<Vec<DaySchedule>>,
}

impl InMemoryScheduleRepo {
    pub fn new() -> Self {
        Self {
            schedules: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IScheduleRepo for InMemoryScheduleRepo {
    async fn insert(&self, schedule: &DaySchedule) -> anyhow::Result<()> {
        insert(schedule, &self.schedules);
        Ok(())
    }

    async fn save(&self, schedule: &DaySchedule) -> anyhow::Result<()> {
        save(schedule, &self.schedules);
        Ok(())
    }

    async fn find_by_user_and_date(&self, user_id: &ID, date: &Day) -> Option<DaySchedule> {
        let schedules = find_by(&self.schedules, |schedule| {
            schedule.user_id == *user_id && schedule.date == *date
        });
        schedules.into_iter().next()
    }
}
