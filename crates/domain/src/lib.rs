mod auth;
mod date;
mod reminder;
mod schedule;
mod shared;
mod task;
mod timeofday;
mod user;

pub use auth::{RefreshToken, TelegramLinkCode};
pub use date::{Day, InvalidDateError};
pub use reminder::{ReminderClass, ReminderSettings, SentFlags};
pub use schedule::DaySchedule;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use task::TaskBlock;
pub use timeofday::{InvalidTimeOfDayError, TimeOfDay};
pub use user::{TelegramLink, User, UserSettings, DEFAULT_TIMEZONE};
