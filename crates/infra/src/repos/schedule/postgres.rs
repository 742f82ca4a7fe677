use super::IScheduleRepo;
use dayline_domain::{Day, DaySchedule, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresScheduleRepo {
    pool: PgPool,
}

impl PostgresScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduleRaw {
    schedule_uid: Uuid,
    user_uid: Uuid,
    date: String,
    created: i64,
    updated: i64,
}

impl TryFrom<ScheduleRaw> for DaySchedule {
    type Error = anyhow::Error;

    fn try_from(raw: ScheduleRaw) -> Result<Self, Self::Error> {
        let date = raw.date.parse::<Day>()?;
        Ok(DaySchedule {
            id: raw.schedule_uid.into(),
            user_id: raw.user_uid.into(),
            date,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

#[async_trait::async_trait]
impl IScheduleRepo for PostgresScheduleRepo {
    async fn insert(&self, schedule: &DaySchedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules(schedule_uid, user_uid, date, created, updated)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(schedule.user_id.inner_ref())
        .bind(schedule.date.to_string())
        .bind(schedule.created)
        .bind(schedule.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, schedule: &DaySchedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE schedules
            SET date = $2,
            updated = $3
            WHERE schedule_uid = $1
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(schedule.date.to_string())
        .bind(schedule.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user_and_date(&self, user_id: &ID, date: &Day) -> Option<DaySchedule> {
        let schedule: ScheduleRaw = match sqlx::query_as::<_, ScheduleRaw>(
            r#"
            SELECT * FROM schedules AS s
            WHERE s.user_uid = $1 AND s.date = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(date.to_string())
        .fetch_one(&self.pool)
        .await
        {
            Ok(schedule) => schedule,
            Err(_) => return None,
        };
        DaySchedule::try_from(schedule).ok()
    }
}
