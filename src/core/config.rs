// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;

use crate::models::{GenerationSettings, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

// Configuration for the generator
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Password Generation
    pub default_password_length: usize,
    pub default_password_exclude_similar: bool,
    pub default_include_uppercase: bool,
    pub default_include_lowercase: bool,
    pub default_include_numbers: bool,
    pub default_include_symbols: bool,

    // Clipboard
    pub clipboard_clear_timeout: Option<Duration>,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,

    // Problems found while loading; logged once the logger is up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Password Generation
            default_password_length: 16,
            default_password_exclude_similar: false,
            default_include_uppercase: true,
            default_include_lowercase: true,
            default_include_numbers: true,
            default_include_symbols: true,

            // Clipboard
            clipboard_clear_timeout: Some(Duration::from_secs(30)),

            // Logging
            log_level: LevelFilter::Warn,
            log_file: None,

            warnings: Vec::new(),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unknown or
    /// unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Password Generation
        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.parse::<usize>() {
                Ok(length) => {
                    config.default_password_length = length.clamp(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH);
                }
                Err(_) => config
                    .warnings
                    .push(format!("Ignoring invalid DEFAULT_PASSWORD_LENGTH '{}'", val)),
            }
        }

        parse_flag(&lookup, "DEFAULT_PASSWORD_EXCLUDE_SIMILAR", &mut config.default_password_exclude_similar, &mut config.warnings);
        parse_flag(&lookup, "DEFAULT_INCLUDE_UPPERCASE", &mut config.default_include_uppercase, &mut config.warnings);
        parse_flag(&lookup, "DEFAULT_INCLUDE_LOWERCASE", &mut config.default_include_lowercase, &mut config.warnings);
        parse_flag(&lookup, "DEFAULT_INCLUDE_NUMBERS", &mut config.default_include_numbers, &mut config.warnings);
        parse_flag(&lookup, "DEFAULT_INCLUDE_SYMBOLS", &mut config.default_include_symbols, &mut config.warnings);

        // Clipboard
        if let Some(val) = lookup("CLIPBOARD_CLEAR_SECONDS") {
            match val.parse::<u64>() {
                Ok(0) => config.clipboard_clear_timeout = None,
                Ok(secs) => config.clipboard_clear_timeout = Some(Duration::from_secs(secs)),
                Err(_) => config
                    .warnings
                    .push(format!("Ignoring invalid CLIPBOARD_CLEAR_SECONDS '{}'", val)),
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => config
                    .warnings
                    .push(format!("Unknown log level '{}', using {}", level, config.log_level)),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        config
    }

    /// Report what `from_lookup` ignored. Call after the logger is set up.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }
    }

    /// Generation settings a fresh session starts with.
    pub fn default_settings(&self) -> GenerationSettings {
        GenerationSettings {
            length: self.default_password_length,
            include_uppercase: self.default_include_uppercase,
            include_lowercase: self.default_include_lowercase,
            include_numbers: self.default_include_numbers,
            include_symbols: self.default_include_symbols,
            exclude_similar: self.default_password_exclude_similar,
        }
    }
}

fn parse_flag<F>(lookup: &F, key: &str, target: &mut bool, warnings: &mut Vec<String>)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(key) {
        match val.to_lowercase().as_str() {
            "true" | "1" | "yes" => *target = true,
            "false" | "0" | "no" => *target = false,
            _ => warnings.push(format!("Ignoring invalid {} '{}'", key, val)),
        }
    }
}
