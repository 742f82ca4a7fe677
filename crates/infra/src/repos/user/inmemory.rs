use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use dayline_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        let users = find_by(&self.users, |user| user.username == username);
        users.into_iter().next()
    }

    async fn find_by_chat_id(&self, chat_id: &str) -> Option<User> {
        let users = find_by(&self.users, |user| match &user.telegram {
            Some(telegram) => telegram.chat_id == chat_id,
            None => false,
        });
        users.into_iter().next()
    }

    async fn find_with_telegram_linked(&self) -> anyhow::Result<Vec<User>> {
        let users = find_by(&self.users, |user| user.telegram.is_some());
        Ok(users)
    }
}
