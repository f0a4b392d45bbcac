// src/cli/notify.rs
use console::style;

/// Transient user-facing messages.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints to the terminal. Success messages are suppressed when `quiet`
/// so JSON output on stdout stays parseable.
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        if self.quiet {
            log::info!("{}", message);
            return;
        }
        println!("{} {}", style("✅").green(), style(message).green());
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("❌").red(), style(message).red().bold());
    }
}
