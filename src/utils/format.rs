// src/utils/format.rs
use chrono::{DateTime, Utc};
use console::{style, StyledObject};

use crate::models::StrengthLevel;

// Format a timestamp relative to `now`
pub fn format_time_ago(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(time);

    let seconds = duration.num_seconds().max(0);

    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", duration.num_minutes())
    } else if seconds < 86400 {
        format!("{} hours ago", duration.num_hours())
    } else {
        format!("{} days ago", duration.num_days())
    }
}

/// Keep the first and last two characters visible.
pub fn mask_password(password: &str) -> String {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 4), tail)
}

pub fn styled_level(level: StrengthLevel) -> StyledObject<String> {
    let label = level.to_string();
    match level {
        StrengthLevel::Weak => style(label).red(),
        StrengthLevel::Medium => style(label).yellow(),
        StrengthLevel::Strong => style(label).green(),
    }
}

/// Text progress bar for a 0-100 score, e.g. `[#######---]`.
pub fn strength_bar(score: u8) -> String {
    let filled = (score.min(100) as usize + 5) / 10;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}
