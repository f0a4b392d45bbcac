use rand::distributions::{Distribution, Uniform};
use rand::{CryptoRng, RngCore};

use super::{GeneratorError, Result};
use crate::models::{
    GeneratedPassword, GenerationSettings, PasswordAnalysis, StrengthLevel,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters dropped when `exclude_similar` is set.
pub const SIMILAR: &str = "il1LoO0";

const MAX_SCORE: u8 = 100;

/// Assemble the candidate characters for `settings`.
///
/// Classes are appended in a fixed order (lowercase, uppercase, digits,
/// symbols). The result is empty when no class is enabled.
pub fn build_charset(settings: &GenerationSettings) -> String {
    let mut charset = String::new();

    if settings.include_lowercase {
        charset.push_str(LOWERCASE);
    }
    if settings.include_uppercase {
        charset.push_str(UPPERCASE);
    }
    if settings.include_numbers {
        charset.push_str(DIGITS);
    }
    if settings.include_symbols {
        charset.push_str(SYMBOLS);
    }

    if settings.exclude_similar {
        charset.retain(|c| !SIMILAR.contains(c));
    }

    charset
}

/// Like [`build_charset`], but an empty charset is an error.
pub fn require_charset(settings: &GenerationSettings) -> Result<String> {
    let charset = build_charset(settings);
    if charset.is_empty() {
        return Err(GeneratorError::EmptyCharset);
    }
    Ok(charset)
}

// Additive heuristic, each criterion counted once
pub fn score_strength(password: &str) -> u8 {
    let length = password.chars().count();
    let mut score: u8 = 0;

    if length >= 8 {
        score += 25;
    }
    if length >= 12 {
        score += 25;
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 10;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 20;
    }

    score.min(MAX_SCORE)
}

/// Suggestions for improving `password`, worst problems first.
pub fn strength_feedback(password: &str) -> Vec<String> {
    let mut feedback = Vec::new();
    let length = password.chars().count();

    match StrengthLevel::from_score(score_strength(password)) {
        StrengthLevel::Weak => feedback.push("Weak password".to_string()),
        StrengthLevel::Medium => feedback.push("Moderate password".to_string()),
        StrengthLevel::Strong => feedback.push("Strong password".to_string()),
    }

    if length < 12 {
        feedback.push("Increase password length to at least 12 characters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        feedback.push("Add lowercase letters for better security".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        feedback.push("Add uppercase letters for better security".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        feedback.push("Add numbers for better security".to_string());
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        feedback.push("Add symbols for better security".to_string());
    }

    if let Some(hint) = consecutive_run_hint(password) {
        feedback.push(hint.to_string());
    }

    feedback
}

// Detects runs like "abc" or "123"
fn consecutive_run_hint(password: &str) -> Option<&'static str> {
    let mut letters = 1;
    let mut digits = 1;

    let mut chars = password.chars();
    let mut prev = chars.next()?;

    for curr in chars {
        if curr as u32 == prev as u32 + 1 {
            letters = if curr.is_ascii_alphabetic() && prev.is_ascii_alphabetic() { letters + 1 } else { 1 };
            digits = if curr.is_ascii_digit() && prev.is_ascii_digit() { digits + 1 } else { 1 };
        } else {
            letters = 1;
            digits = 1;
        }

        if letters >= 3 {
            return Some("Avoid using consecutive letters (e.g., 'abc')");
        }
        if digits >= 3 {
            return Some("Avoid using consecutive numbers (e.g., '123')");
        }

        prev = curr;
    }

    None
}

pub fn analyze(password: &str) -> PasswordAnalysis {
    let strength = score_strength(password);
    PasswordAnalysis {
        strength,
        level: StrengthLevel::from_score(strength),
        feedback: strength_feedback(password),
    }
}

/// Random password generation over an injected cryptographic RNG.
pub struct PasswordEngine;

impl PasswordEngine {
    pub fn new() -> Self {
        PasswordEngine
    }

    /// Draw `settings.length` characters uniformly, with replacement, from
    /// the charset implied by `settings`.
    pub fn generate<R>(&self, settings: &GenerationSettings, rng: &mut R) -> Result<GeneratedPassword>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let charset = require_charset(settings)?;

        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&settings.length) {
            return Err(GeneratorError::InvalidLength(settings.length));
        }

        let chars = charset.as_bytes();
        let dist = Uniform::from(0..chars.len());

        let value: String = (0..settings.length)
            .map(|_| chars[dist.sample(&mut *rng)] as char)
            .collect();

        log::debug!(
            "Generated password of length {} from a charset of {} characters",
            settings.length,
            chars.len()
        );

        let strength_score = score_strength(&value);
        Ok(GeneratedPassword { value, strength_score })
    }
}

impl Default for PasswordEngine {
    fn default() -> Self {
        Self::new()
    }
}
