mod telegram;

pub use telegram::{escape_html, IMessenger, InMemoryMessenger, TelegramMessenger};
