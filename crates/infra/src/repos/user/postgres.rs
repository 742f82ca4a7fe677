use super::IUserRepo;
use dayline_domain::{ReminderSettings, TelegramLink, User, UserSettings, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    username: String,
    password_hash: String,
    display_name: Option<String>,
    remind_before: bool,
    remind_on_start: bool,
    nudge_mid: bool,
    congratulate_on_end: bool,
    slot_duration_minutes: i64,
    timezone: String,
    telegram_chat_id: Option<String>,
    telegram_username: Option<String>,
    created: i64,
    updated: i64,
}

impl Into<User> for UserRaw {
    fn into(self) -> User {
        let telegram_username = self.telegram_username;
        let telegram = self.telegram_chat_id.map(|chat_id| TelegramLink {
            chat_id,
            username: telegram_username,
        });
        User {
            id: self.user_uid.into(),
            username: self.username,
            password_hash: self.password_hash,
            display_name: self.display_name,
            settings: UserSettings {
                reminders: ReminderSettings {
                    remind_before: self.remind_before,
                    remind_on_start: self.remind_on_start,
                    nudge_mid: self.nudge_mid,
                    congratulate_on_end: self.congratulate_on_end,
                },
                slot_duration_minutes: self.slot_duration_minutes,
                timezone: self.timezone,
            },
            telegram,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, username, password_hash, display_name,
                remind_before, remind_on_start, nudge_mid, congratulate_on_end,
                slot_duration_minutes, timezone, telegram_chat_id, telegram_username,
                created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(user.settings.reminders.remind_before)
        .bind(user.settings.reminders.remind_on_start)
        .bind(user.settings.reminders.nudge_mid)
        .bind(user.settings.reminders.congratulate_on_end)
        .bind(user.settings.slot_duration_minutes)
        .bind(&user.settings.timezone)
        .bind(user.telegram.as_ref().map(|t| t.chat_id.clone()))
        .bind(user.telegram.as_ref().and_then(|t| t.username.clone()))
        .bind(user.created)
        .bind(user.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET username = $2,
            password_hash = $3,
            display_name = $4,
            remind_before = $5,
            remind_on_start = $6,
            nudge_mid = $7,
            congratulate_on_end = $8,
            slot_duration_minutes = $9,
            timezone = $10,
            telegram_chat_id = $11,
            telegram_username = $12,
            updated = $13
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(user.settings.reminders.remind_before)
        .bind(user.settings.reminders.remind_on_start)
        .bind(user.settings.reminders.nudge_mid)
        .bind(user.settings.reminders.congratulate_on_end)
        .bind(user.settings.slot_duration_minutes)
        .bind(&user.settings.timezone)
        .bind(user.telegram.as_ref().map(|t| t.chat_id.clone()))
        .bind(user.telegram.as_ref().and_then(|t| t.username.clone()))
        .bind(user.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        let user: UserRaw = match sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => user,
            Err(_) => return None,
        };
        Some(user.into())
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        let user: UserRaw = match sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.username = $1
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => user,
            Err(_) => return None,
        };
        Some(user.into())
    }

    async fn find_by_chat_id(&self, chat_id: &str) -> Option<User> {
        let user: UserRaw = match sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.telegram_chat_id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => user,
            Err(_) => return None,
        };
        Some(user.into())
    }

    async fn find_with_telegram_linked(&self) -> anyhow::Result<Vec<User>> {
        let users: Vec<UserRaw> = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.telegram_chat_id IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}
