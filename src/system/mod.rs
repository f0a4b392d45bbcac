// src/system/mod.rs
pub mod clipboard;

pub use clipboard::{ClipboardWriter, SystemClipboard};
