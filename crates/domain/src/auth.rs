use crate::shared::entity::ID;
use dayline_utils::{create_random_digits, create_random_secret};

/// An opaque refresh token handed out at login. It is kept server side so
/// that logout can revoke it before it expires.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub user_id: ID,
    pub token: String,
    pub expires_at: i64,
}

impl RefreshToken {
    pub fn new(user_id: ID, expires_at: i64) -> Self {
        Self {
            user_id,
            token: create_random_secret(64),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// A short lived numeric code for connecting a telegram chat to an
/// account. Each user has at most one active code at a time.
#[derive(Debug, Clone)]
pub struct TelegramLinkCode {
    pub user_id: ID,
    pub code: String,
    pub expires_at: i64,
}

impl TelegramLinkCode {
    pub fn new(user_id: ID, expires_at: i64) -> Self {
        Self {
            user_id,
            code: create_random_digits(6),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_expires_tokens_at_the_deadline() {
        let token = RefreshToken::new(Default::default(), 1000);
        assert!(!token.is_expired(999));
        assert!(token.is_expired(1000));
        assert!(token.is_expired(1001));
    }

    #[test]
    fn it_creates_numeric_link_codes() {
        let code = TelegramLinkCode::new(Default::default(), 1000);
        assert_eq!(code.code.len(), 6);
        assert!(code.code.chars().all(|c| c.is_ascii_digit()));
    }
}
