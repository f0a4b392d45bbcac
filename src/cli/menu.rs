// src/cli/menu.rs
use inquire::{Confirm, InquireError, Select, Text};
use rand::rngs::OsRng;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cli::handlers::{handle_copy, handle_generate, render_generated, render_history};
use crate::cli::notify::{ConsoleNotifier, Notifier};
use crate::core::{Config, PasswordHistory, Session};
use crate::education::{EducationManager, COMING_SOON};
use crate::models::{GenerationSettings, HistoryEntry, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::system::{ClipboardWriter, SystemClipboard};
use crate::utils::{format_time_ago, mask_password};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Generate,
    Settings,
    CopyCurrent,
    History,
    Tips,
    ComingSoon,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 7] = [
        MenuAction::Generate,
        MenuAction::Settings,
        MenuAction::CopyCurrent,
        MenuAction::History,
        MenuAction::Tips,
        MenuAction::ComingSoon,
        MenuAction::Exit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::Generate => "🔐  Generate password",
            MenuAction::Settings => "⚙️   Change settings",
            MenuAction::CopyCurrent => "📋  Copy current password",
            MenuAction::History => "🕘  Password history",
            MenuAction::Tips => "📖  Security tips & FAQ",
            MenuAction::ComingSoon => "🚧  Breach check & export",
            MenuAction::Exit => "🚪  Exit",
        };
        f.write_str(label)
    }
}

// Esc and Ctrl+C at a prompt both mean "go back"
fn cancelled(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

pub fn run_cli_menu(config: &Config, should_exit: Arc<AtomicBool>) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════╗");
    println!("║        🛡️  SECUREPASS GENERATOR        ║");
    println!("╚══════════════════════════════════════╝");
    println!("Passwords are generated locally and kept for this session only.\n");

    let notifier = ConsoleNotifier::new(false);
    let mut clipboard = SystemClipboard::new(config.clipboard_clear_timeout);
    let mut session = Session::new(config.default_settings());
    let education = EducationManager::new();

    while !should_exit.load(Ordering::SeqCst) {
        let action = match Select::new("What would you like to do?", MenuAction::ALL.to_vec())
            .with_page_size(MenuAction::ALL.len())
            .prompt()
        {
            Ok(action) => action,
            Err(e) if cancelled(&e) => break,
            Err(e) => return Err(e.into()),
        };

        let result = match action {
            MenuAction::Generate => {
                if let Ok(generated) = handle_generate(&mut session, &mut OsRng, &notifier) {
                    println!("{}\n", render_generated(generated));
                }
                Ok(())
            }
            MenuAction::Settings => prompt_settings(&session.settings).map(|settings| {
                if let Some(settings) = settings {
                    log::info!("Generation settings updated: {:?}", settings);
                    session.settings = settings;
                }
            }),
            MenuAction::CopyCurrent => {
                match session.current() {
                    Some(current) => {
                        handle_copy(&mut clipboard, &notifier, &current.value);
                    }
                    None => notifier.error("Generate a password first"),
                }
                Ok(())
            }
            MenuAction::History => show_history(&session, &mut clipboard, &notifier),
            MenuAction::Tips => show_topics(&education),
            MenuAction::ComingSoon => {
                for (name, description) in COMING_SOON {
                    println!("🚧 {} (coming soon): {}", name, description);
                }
                println!();
                Ok(())
            }
            MenuAction::Exit => break,
        };

        match result {
            Ok(()) => {}
            Err(e) if cancelled(&e) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    clipboard.flush();
    log::info!("Session closed, {} passwords discarded", session.history().len());
    println!("👋 Session history cleared. Goodbye!");
    Ok(())
}

/// Ask for new settings. `None` means the input was rejected and the old
/// settings stay in place.
fn prompt_settings(current: &GenerationSettings) -> Result<Option<GenerationSettings>, InquireError> {
    let input = Text::new(&format!(
        "Password length ({}-{}):",
        MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
    ))
    .with_default(&current.length.to_string())
    .prompt()?;

    let Some(length) = parse_length(&input) else {
        println!(
            "❌ Length must be a number between {} and {}. Settings unchanged.",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        );
        return Ok(None);
    };

    let include_uppercase = Confirm::new("Include uppercase letters?")
        .with_default(current.include_uppercase)
        .prompt()?;

    let include_lowercase = Confirm::new("Include lowercase letters?")
        .with_default(current.include_lowercase)
        .prompt()?;

    let include_numbers = Confirm::new("Include numbers?")
        .with_default(current.include_numbers)
        .prompt()?;

    let include_symbols = Confirm::new("Include symbols?")
        .with_default(current.include_symbols)
        .prompt()?;

    let exclude_similar = Confirm::new("Exclude similar characters (i, l, 1, L, o, 0, O)?")
        .with_default(current.exclude_similar)
        .prompt()?;

    let settings = GenerationSettings {
        length,
        include_uppercase,
        include_lowercase,
        include_numbers,
        include_symbols,
        exclude_similar,
    };

    if !settings.has_character_class() {
        println!("⚠️ No character types selected; generation will fail until one is enabled.");
    }

    Ok(Some(settings))
}

/// Accepted length from the settings prompt, or `None` when the input is not
/// a number in range.
fn parse_length(input: &str) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|length| (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(length))
}

// One label per entry, newest first, then "Back". Masked labels can collide.
fn history_choices(history: &PasswordHistory, now: DateTime<Utc>) -> Vec<String> {
    let mut choices: Vec<String> = history
        .iter()
        .map(|entry| {
            format!(
                "{}  ({}/100, {})",
                mask_password(&entry.password),
                entry.strength,
                format_time_ago(entry.created_at, now)
            )
        })
        .collect();
    choices.push("↩️  Back".to_string());
    choices
}

// Selected position to entry; the trailing "Back" has none.
fn entry_for_choice(history: &PasswordHistory, index: usize) -> Option<&HistoryEntry> {
    history.get(index)
}

fn show_history(
    session: &Session,
    clipboard: &mut dyn ClipboardWriter,
    notifier: &dyn Notifier,
) -> Result<(), InquireError> {
    let history = session.history();
    if history.is_empty() {
        println!("{}\n", render_history(history, Utc::now()));
        return Ok(());
    }

    let choices = history_choices(history, Utc::now());
    let page_size = choices.len();
    let selection = Select::new("Select a password to copy:", choices)
        .with_page_size(page_size)
        .raw_prompt()?;

    if let Some(entry) = entry_for_choice(history, selection.index) {
        handle_copy(clipboard, notifier, &entry.password);
    }

    Ok(())
}

fn show_topics(education: &EducationManager) -> Result<(), InquireError> {
    let topics = education.list_topics();
    let titles: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();

    let selection = Select::new("Choose a topic:", titles).prompt()?;

    if let Some(topic) = topics.iter().find(|t| t.title == selection) {
        println!("\n{}\n", topic.content);
        if !topic.related_topics.is_empty() {
            let related: Vec<&str> = topic
                .related_topics
                .iter()
                .filter_map(|id| education.get_topic(id))
                .map(|t| t.title.as_str())
                .collect();
            println!("Related: {}\n", related.join(", "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeneratedPassword;

    #[test]
    fn test_menu_labels_are_unique() {
        let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.to_string()).collect();
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(labels.len(), deduped.len());
    }

    #[test]
    fn test_identical_labels_resolve_by_position() {
        let mut history = PasswordHistory::new();
        let created_at = Utc::now();
        for password in ["ab#1", "cd#2"] {
            let mut entry = HistoryEntry::new(&GeneratedPassword {
                value: password.to_string(),
                strength_score: 30,
            });
            entry.created_at = created_at;
            history.push(entry);
        }

        let choices = history_choices(&history, created_at);
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[0], choices[1]);

        assert_eq!(entry_for_choice(&history, 0).unwrap().password, "cd#2");
        assert_eq!(entry_for_choice(&history, 1).unwrap().password, "ab#1");
        assert!(entry_for_choice(&history, 2).is_none());
    }

    #[test]
    fn test_length_input_is_validated() {
        assert_eq!(parse_length(" 20 "), Some(20));
        assert_eq!(parse_length("4"), Some(MIN_PASSWORD_LENGTH));
        assert_eq!(parse_length("64"), Some(MAX_PASSWORD_LENGTH));
        assert_eq!(parse_length("3"), None);
        assert_eq!(parse_length("65"), None);
        assert_eq!(parse_length("abc"), None);
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("-5"), None);
    }

    #[test]
    fn test_cancel_errors_are_recognized() {
        assert!(cancelled(&InquireError::OperationCanceled));
        assert!(cancelled(&InquireError::OperationInterrupted));
        assert!(!cancelled(&InquireError::Custom("boom".into())));
    }
}
