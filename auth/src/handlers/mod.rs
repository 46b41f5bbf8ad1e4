//! HTTP handlers for account endpoints.

pub mod account;

pub use account::{account_router, login, register};
