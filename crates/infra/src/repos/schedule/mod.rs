mod inmemory;
mod postgres;

use dayline_domain::{Day, DaySchedule, ID};
pub use inmemory::InMemoryScheduleRepo;
pub use postgres::PostgresScheduleRepo;

#[async_trait::async_trait]
pub trait IScheduleRepo: Send + Sync {
    async fn insert(&self, schedule: &DaySchedule) -> anyhow::Result<()>;
    async fn save(&self, schedule: &DaySchedule) -> anyhow::Result<()>;
    async fn find_by_user_and_date(&self, user_id: &ID, date: &Day) -> Option<DaySchedule>;
}

#[cfg(test)]
mod tests {
    use crate::DaylineContext;
    use dayline_domain::{DaySchedule, User};

    #[tokio::test]
    async fn it_finds_schedules_by_user_and_date() {
        let ctx = DaylineContext::create_inmemory();

        let user = User::new("lena".into(), "hash".into(), None, 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let date = "2021-03-01".parse().unwrap();
        assert!(ctx
            .repos
            .schedules
            .find_by_user_and_date(&user.id, &date)
            .await
            .is_none());

        let mut schedule = DaySchedule::new(user.id.clone(), date, 100);
        ctx.repos
            .schedules
            .insert(&schedule)
            .await
            .expect("To insert schedule");

        let date = "2021-03-01".parse().unwrap();
        let found = ctx
            .repos
            .schedules
            .find_by_user_and_date(&user.id, &date)
            .await
            .expect("To find schedule");
        assert_eq!(found.id, schedule.id);
        assert_eq!(found.updated, 100);

        // Other date or other user gives nothing
        let other_date = "2021-03-02".parse().unwrap();
        assert!(ctx
            .repos
            .schedules
            .find_by_user_and_date(&user.id, &other_date)
            .await
            .is_none());
        assert!(ctx
            .repos
            .schedules
            .find_by_user_and_date(&Default::default(), &date)
            .await
            .is_none());

        schedule.updated = 200;
        ctx.repos
            .schedules
            .save(&schedule)
            .await
            .expect("To save schedule");
        let found = ctx
            .repos
            .schedules
            .find_by_user_and_date(&user.id, &date)
            .await
            .expect("To find schedule");
        assert_eq!(found.updated, 200);
    }
}
