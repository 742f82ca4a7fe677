use super::ILinkCodeRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use dayline_domain::TelegramLinkCode;
use std::sync::Mutex;

pub struct InMemoryLinkCodeRepo {
    codes: Mutex<Vec<TelegramLinkCode>>,
}

impl InMemoryLinkCodeRepo {
    pub fn new() -> Self {
        Self {
            codes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ILinkCodeRepo for InMemoryLinkCodeRepo {
    async fn replace_for_user(&self, code: &TelegramLinkCode) -> anyhow::Result<()> {
        find_and_delete_by(&self.codes, |c| c.user_id == code.user_id);
        insert(code, &self.codes);
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Option<TelegramLinkCode> {
        find_by(&self.codes, |c| c.code == code).into_iter().next()
    }

    async fn delete_by_code(&self, code: &str) -> DeleteResult {
        delete_by(&self.codes, |c| c.code == code)
    }
}
