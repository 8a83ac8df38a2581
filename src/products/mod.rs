//! Product HTTP handlers and their shared state

pub mod handlers;

pub use handlers::{AppState, BalanceResponse};
