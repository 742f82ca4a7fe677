use reqwest::Client;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, warn};

const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";
const SEND_MESSAGE_TIMEOUT_SECS: u64 = 10;

/// Escapes user provided text for telegrams HTML parse mode. Only `&`,
/// `<` and `>` are special there.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Delivers a text to a chat. Implementations report plain success or
/// failure, retrying is the callers job.
#[async_trait::async_trait]
pub trait IMessenger: Send + Sync {
    async fn notify(&self, chat_id: &str, text: &str) -> bool;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramMessenger {
    client: Client,
    bot_token: Option<String>,
}

impl TelegramMessenger {
    pub fn new(bot_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            bot_token,
        }
    }
}

#[async_trait::async_trait]
impl IMessenger for TelegramMessenger {
    async fn notify(&self, chat_id: &str, text: &str) -> bool {
        let bot_token = match &self.bot_token {
            Some(bot_token) => bot_token,
            None => {
                warn!("Dropping telegram message, no bot token is configured.");
                return false;
            }
        };
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE_URL, bot_token);
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
        };
        match self
            .client
            .post(&url)
            .timeout(Duration::from_secs(SEND_MESSAGE_TIMEOUT_SECS))
            .json(&body)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                error!(
                    "[Unexpected Response] Telegram sendMessage returned status: {}",
                    res.status()
                );
                false
            }
            Err(e) => {
                error!(
                    "[Network Error] Telegram sendMessage error. Error message: {:?}",
                    e
                );
                false
            }
        }
    }
}

/// Messenger that records deliveries instead of calling telegram, used by
/// tests. Flip `set_failing` to make every delivery fail.
pub struct InMemoryMessenger {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
    attempts: AtomicUsize,
}

impl InMemoryMessenger {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// How many deliveries were attempted, including failed ones
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(chat, _)| chat == chat_id)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl IMessenger for InMemoryMessenger {
    async fn notify(&self, chat_id: &str, text: &str) -> bool {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return false;
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((chat_id.to_string(), text.to_string()));
        true
    }
}
