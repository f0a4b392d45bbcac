use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};

mod cli;
mod core;
mod education;
mod generators;
mod logging;
mod models;
mod system;
mod utils;

#[cfg(test)]
mod tests;

use crate::cli::Args;
use crate::core::config::Config;

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let config = Config::load();

    logging::init(&config)?;
    config.log_warnings();
    log::info!("🛡️ Starting SecurePass");
    log::debug!("Loaded config: {:?}", config);

    if let Some(command) = args.command {
        return cli::handlers::run_command(command, args.json, &config);
    }

    let should_exit = Arc::new(AtomicBool::new(false));
    {
        let should_exit = Arc::clone(&should_exit);
        ctrlc::set_handler(move || {
            log::info!("🔴 Ctrl+C received. Discarding session history...");
            should_exit.store(true, Ordering::SeqCst);
            println!("\n🧹 Session history cleared. Goodbye!");
            std::process::exit(0);
        })?;
    }

    cli::menu::run_cli_menu(&config, should_exit)?;

    log::info!("✅ SecurePass shutdown complete.");
    Ok(ExitCode::SUCCESS)
}
