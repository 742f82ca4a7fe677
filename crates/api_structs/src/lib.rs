mod auth;
mod schedule;
mod status;
mod user;
mod webhook;

pub mod dtos {
    pub use crate::schedule::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::auth::api::*;
pub use crate::schedule::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
pub use crate::webhook::api::*;
