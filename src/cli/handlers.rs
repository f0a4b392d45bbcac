// src/cli/handlers.rs
use std::fmt::Write as _;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde_json::json;

use crate::cli::notify::{ConsoleNotifier, Notifier};
use crate::cli::CliCommand;
use crate::core::{Config, PasswordHistory, Session};
use crate::education::{EducationManager, COMING_SOON};
use crate::generators::{self, GeneratorError};
use crate::models::{GeneratedPassword, PasswordAnalysis};
use crate::system::{ClipboardWriter, SystemClipboard};
use crate::utils::{format_time_ago, mask_password, strength_bar, styled_level};

pub const GENERATED_MESSAGE: &str = "Password generated!";
pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

/// Generate into `session` and report the outcome through `notifier`.
///
/// Failures are reported and handed back; the session is unchanged.
pub fn handle_generate<'s, R>(
    session: &'s mut Session,
    rng: &mut R,
    notifier: &dyn Notifier,
) -> Result<&'s GeneratedPassword, GeneratorError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    match session.generate(rng) {
        Ok(generated) => {
            log::info!("Generated password (strength {})", generated.strength_score);
            notifier.success(GENERATED_MESSAGE);
            Ok(generated)
        }
        Err(e) => {
            log::warn!("Password generation aborted: {}", e);
            notifier.error(&e.to_string());
            Err(e)
        }
    }
}

pub fn handle_copy(clipboard: &mut dyn ClipboardWriter, notifier: &dyn Notifier, text: &str) -> bool {
    match clipboard.write_text(text) {
        Ok(()) => {
            notifier.success(COPIED_MESSAGE);
            true
        }
        Err(e) => {
            log::error!("{}", e);
            notifier.error(&e.to_string());
            false
        }
    }
}

pub fn handle_analyze(password: &str) -> PasswordAnalysis {
    generators::analyze(password)
}

pub fn render_generated(generated: &GeneratedPassword) -> String {
    format!(
        "\nGenerated Password: {}\nStrength: {} {}/100 {}",
        generated.value,
        strength_bar(generated.strength_score),
        generated.strength_score,
        styled_level(generated.level()),
    )
}

pub fn render_analysis(analysis: &PasswordAnalysis) -> String {
    let mut out = format!(
        "Strength: {} {}/100 {}\n",
        strength_bar(analysis.strength),
        analysis.strength,
        styled_level(analysis.level),
    );
    for hint in &analysis.feedback {
        let _ = writeln!(out, "  • {}", hint);
    }
    out
}

pub fn render_history(history: &PasswordHistory, now: DateTime<Utc>) -> String {
    if history.is_empty() {
        return "History is empty. Generate your first password.".to_string();
    }

    let mut out = String::new();
    for (index, entry) in history.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<20} {:<8} {}",
            index + 1,
            mask_password(&entry.password),
            crate::models::StrengthLevel::from_score(entry.strength).to_string(),
            format_time_ago(entry.created_at, now),
        );
    }
    out
}

pub fn render_topics(manager: &EducationManager) -> String {
    let mut out = String::new();
    for category in ["Security Basics", "FAQ"] {
        for topic in manager.topics_in(category) {
            let _ = writeln!(out, "{}\n", topic.content);
        }
    }
    let _ = writeln!(out, "# Coming soon\n");
    for (name, description) in COMING_SOON {
        let _ = writeln!(out, "- {}: {}", name, description);
    }
    out
}

pub fn generated_json(passwords: &[GeneratedPassword]) -> serde_json::Value {
    let items: Vec<_> = passwords
        .iter()
        .map(|p| {
            json!({
                "password": p.value,
                "strength": p.strength_score,
                "level": p.level(),
            })
        })
        .collect();
    json!({ "success": true, "passwords": items })
}

pub fn generation_error_json(error: &GeneratorError) -> serde_json::Value {
    json!({ "success": false, "error": error.to_string() })
}

/// Run a one-shot subcommand.
pub fn run_command(command: CliCommand, json_output: bool, config: &Config) -> anyhow::Result<ExitCode> {
    let notifier = ConsoleNotifier::new(json_output);

    match &command {
        CliCommand::Generate { count, copy, .. } => {
            let settings = command
                .generation_settings(&config.default_settings())
                .unwrap_or_default();
            let mut session = Session::new(settings);
            let mut generated = Vec::with_capacity(usize::from(*count));

            for _ in 0..*count {
                match handle_generate(&mut session, &mut OsRng, &notifier) {
                    Ok(password) => generated.push(password.clone()),
                    Err(e) => {
                        if json_output {
                            println!("{}", generation_error_json(&e));
                        }
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }

            if json_output {
                println!("{}", serde_json::to_string_pretty(&generated_json(&generated))?);
            } else {
                for password in &generated {
                    println!("{}", render_generated(password));
                }
            }

            if *copy {
                if let Some(current) = session.current() {
                    let mut clipboard = SystemClipboard::new(config.clipboard_clear_timeout);
                    if !handle_copy(&mut clipboard, &notifier, &current.value) {
                        return Ok(ExitCode::FAILURE);
                    }

                    // The clear timer dies with the process, so stay alive for it
                    if let Some(timeout) = clipboard.clear_after() {
                        if !json_output {
                            println!("Clipboard will be cleared in {}s (Ctrl+C to leave it)...", timeout.as_secs());
                        }
                        clipboard.wait();
                    }
                }
            }
        }
        CliCommand::Analyze { password } => {
            let analysis = handle_analyze(password);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", render_analysis(&analysis));
            }
        }
        CliCommand::Tips => {
            print!("{}", render_topics(&EducationManager::new()));
        }
    }

    Ok(ExitCode::SUCCESS)
}
