// src/generators/mod.rs
use thiserror::Error;

mod password;

pub use password::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Select at least one character type")]
    EmptyCharset,

    #[error("Password length must be between 4 and 64 characters, got {0}")]
    InvalidLength(usize),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
