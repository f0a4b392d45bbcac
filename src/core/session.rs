// src/core/session.rs
use std::collections::VecDeque;

use rand::{CryptoRng, RngCore};

use crate::generators::{PasswordEngine, Result as GenResult};
use crate::models::{GeneratedPassword, GenerationSettings, HistoryEntry};

/// Maximum number of passwords remembered per session.
pub const HISTORY_LIMIT: usize = 10;

/// Newest-first list of generated passwords, capped at [`HISTORY_LIMIT`].
#[derive(Debug, Default, Clone)]
pub struct PasswordHistory {
    entries: VecDeque<HistoryEntry>,
}

impl PasswordHistory {
    pub fn new() -> Self {
        Self { entries: VecDeque::with_capacity(HISTORY_LIMIT) }
    }

    /// Insert at the front. Returns the evicted entry, if any.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > HISTORY_LIMIT {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the generator shell keeps between actions. Dropped with the
/// process; nothing is persisted.
pub struct Session {
    pub settings: GenerationSettings,
    engine: PasswordEngine,
    current: Option<GeneratedPassword>,
    history: PasswordHistory,
}

impl Session {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            settings,
            engine: PasswordEngine::new(),
            current: None,
            history: PasswordHistory::new(),
        }
    }

    /// Generate with the current settings and record the result.
    ///
    /// On error the current password and the history are left untouched.
    pub fn generate<R>(&mut self, rng: &mut R) -> GenResult<&GeneratedPassword>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let generated = self.engine.generate(&self.settings, rng)?;

        if let Some(evicted) = self.history.push(HistoryEntry::new(&generated)) {
            log::debug!("History full, evicted entry {}", evicted.id);
        }

        Ok(self.current.insert(generated))
    }

    pub fn current(&self) -> Option<&GeneratedPassword> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &PasswordHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::GeneratorError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn entry(password: &str) -> HistoryEntry {
        HistoryEntry::new(&GeneratedPassword {
            value: password.to_string(),
            strength_score: 0,
        })
    }

    #[test]
    fn test_history_newest_first() {
        let mut history = PasswordHistory::new();
        history.push(entry("first"));
        history.push(entry("second"));

        let passwords: Vec<&str> = history.iter().map(|e| e.password.as_str()).collect();
        assert_eq!(passwords, vec!["second", "first"]);
        assert_eq!(history.get(0).unwrap().password, "second");
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = PasswordHistory::new();
        for i in 0..HISTORY_LIMIT {
            assert!(history.push(entry(&format!("pw{i}"))).is_none());
        }
        assert_eq!(history.len(), HISTORY_LIMIT);

        let evicted = history.push(entry("pw10")).unwrap();
        assert_eq!(evicted.password, "pw0");
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.get(0).unwrap().password, "pw10");
        assert_eq!(history.get(HISTORY_LIMIT - 1).unwrap().password, "pw1");
    }

    #[test]
    fn test_session_records_generation() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut session = Session::new(GenerationSettings::default());

        let value = session.generate(&mut rng).unwrap().value.clone();

        assert_eq!(session.current().unwrap().value, value);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().get(0).unwrap().password, value);
    }

    #[test]
    fn test_failed_generation_keeps_state() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let mut session = Session::new(GenerationSettings::default());
        let before = session.generate(&mut rng).unwrap().clone();

        session.settings = GenerationSettings {
            include_uppercase: false,
            include_lowercase: false,
            include_numbers: false,
            include_symbols: false,
            ..session.settings.clone()
        };

        assert_eq!(session.generate(&mut rng).unwrap_err(), GeneratorError::EmptyCharset);
        assert_eq!(session.current(), Some(&before));
        assert_eq!(session.history().len(), 1);
    }
}
