// src/education/mod.rs
use std::collections::BTreeMap;

pub struct EducationManager {
    topics: BTreeMap<String, TopicContent>,
}

#[derive(Debug, Clone)]
pub struct TopicContent {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub related_topics: Vec<String>,
}

/// Features shown in the menu but not available yet.
pub const COMING_SOON: &[(&str, &str)] = &[
    ("Breach check", "Check whether a password appears in known data breaches"),
    ("Export", "Export passwords to 1Password, LastPass or KeePass formats"),
];

fn topic(id: &str, title: &str, category: &str, related: &[&str], content: &str) -> TopicContent {
    TopicContent {
        id: id.to_string(),
        title: title.to_string(),
        content: content.trim().to_string(),
        category: category.to_string(),
        related_topics: related.iter().map(|s| s.to_string()).collect(),
    }
}

impl EducationManager {
    pub fn new() -> Self {
        let topics = [
            topic(
                "tips",
                "Security Tips",
                "Security Basics",
                &["length", "reuse"],
                r#"
# Security Tips

- Use a unique password for every account
- Prefer 12 characters or more; 16+ for important accounts
- Mix lowercase, uppercase, numbers and symbols
- Turn on two-factor authentication wherever it is offered
- Store passwords in a password manager, not in notes or chat
"#,
            ),
            topic(
                "local",
                "Is generation safe?",
                "FAQ",
                &["storage"],
                r#"
# Is generation safe?

Passwords are generated locally on your machine; nothing is sent over the
network. Characters are drawn from the operating system's cryptographically
secure random number generator.
"#,
            ),
            topic(
                "length",
                "How long should a password be?",
                "FAQ",
                &["tips"],
                r#"
# How long should a password be?

At least 12 characters. For especially important accounts use 16-20
characters with every character type enabled.
"#,
            ),
            topic(
                "storage",
                "Are my passwords stored?",
                "FAQ",
                &["local", "lost"],
                r#"
# Are my passwords stored?

No. The history only lives for the current session and is gone when the
program exits. Nothing is written to disk.
"#,
            ),
            topic(
                "lost",
                "I lost a generated password",
                "FAQ",
                &["storage"],
                r#"
# I lost a generated password

Generated passwords are random and cannot be recovered. Save each one in a
safe place or a password manager before closing the session.
"#,
            ),
            topic(
                "reuse",
                "Can I reuse a password?",
                "FAQ",
                &["tips"],
                r#"
# Can I reuse a password?

Absolutely not. Every site and service needs its own password, so a breach
of one site does not expose your other accounts.
"#,
            ),
        ];

        Self {
            topics: topics.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    pub fn get_topic(&self, id: &str) -> Option<&TopicContent> {
        self.topics.get(id)
    }

    /// Topics in a category, ordered by id.
    pub fn topics_in(&self, category: &str) -> Vec<&TopicContent> {
        self.topics.values().filter(|t| t.category == category).collect()
    }

    pub fn list_topics(&self) -> Vec<&TopicContent> {
        self.topics.values().collect()
    }
}

impl Default for EducationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_and_related_links_resolve() {
        let manager = EducationManager::new();
        assert_eq!(manager.list_topics().len(), 6);
        for topic in manager.list_topics() {
            assert!(topic.content.starts_with('#'));
            for related in &topic.related_topics {
                assert!(manager.get_topic(related).is_some(), "dangling link {related}");
            }
        }
    }

    #[test]
    fn test_faq_category() {
        let manager = EducationManager::new();
        assert_eq!(manager.topics_in("FAQ").len(), 5);
        assert_eq!(manager.get_topic("tips").unwrap().category, "Security Basics");
        assert!(manager.get_topic("2fa").is_none());
    }
}
