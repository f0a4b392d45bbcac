// src/models.rs
use uuid::Uuid;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MAX_PASSWORD_LENGTH: usize = 64;

// Password generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub exclude_similar: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
            exclude_similar: false,
        }
    }
}

impl GenerationSettings {
    /// True when at least one character class is switched on.
    pub fn has_character_class(&self) -> bool {
        self.include_uppercase
            || self.include_lowercase
            || self.include_numbers
            || self.include_symbols
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPassword {
    pub value: String,
    pub strength_score: u8,
}

impl GeneratedPassword {
    pub fn level(&self) -> StrengthLevel {
        StrengthLevel::from_score(self.strength_score)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub password: String,
    pub strength: u8,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(generated: &GeneratedPassword) -> Self {
        Self {
            id: Uuid::new_v4(),
            password: generated.value.clone(),
            strength: generated.strength_score,
            created_at: Utc::now(),
        }
    }
}

/// Display bands for a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub const MEDIUM_THRESHOLD: u8 = 40;
    pub const STRONG_THRESHOLD: u8 = 70;

    pub fn from_score(score: u8) -> Self {
        if score < Self::MEDIUM_THRESHOLD {
            StrengthLevel::Weak
        } else if score < Self::STRONG_THRESHOLD {
            StrengthLevel::Medium
        } else {
            StrengthLevel::Strong
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthLevel::Weak => write!(f, "Weak"),
            StrengthLevel::Medium => write!(f, "Medium"),
            StrengthLevel::Strong => write!(f, "Strong"),
        }
    }
}

// Analysis result for a single password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordAnalysis {
    pub strength: u8,
    pub level: StrengthLevel,
    pub feedback: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_bands() {
        assert_eq!(StrengthLevel::from_score(0), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_score(39), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_score(40), StrengthLevel::Medium);
        assert_eq!(StrengthLevel::from_score(69), StrengthLevel::Medium);
        assert_eq!(StrengthLevel::from_score(70), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_score(100), StrengthLevel::Strong);
    }

    #[test]
    fn test_default_settings_enable_every_class() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.length, 16);
        assert!(settings.has_character_class());
        assert!(!settings.exclude_similar);
    }

    #[test]
    fn test_history_entry_copies_password() {
        let generated = GeneratedPassword { value: "abc".into(), strength_score: 10 };
        let a = HistoryEntry::new(&generated);
        let b = HistoryEntry::new(&generated);
        assert_eq!(a.password, "abc");
        assert_eq!(a.strength, 10);
        assert_ne!(a.id, b.id);
    }
}
