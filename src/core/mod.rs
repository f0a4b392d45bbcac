// src/core/mod.rs
pub mod config;
pub mod session;

pub use config::Config;
pub use session::{PasswordHistory, Session, HISTORY_LIMIT};
