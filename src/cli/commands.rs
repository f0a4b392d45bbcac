// src/cli/commands.rs
use clap::Subcommand;

use crate::core::HISTORY_LIMIT;
use crate::models::GenerationSettings;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate one or more passwords
    Generate {
        /// Password length (4-64)
        #[arg(long, short, value_parser = clap::value_parser!(u8).range(4..=64))]
        length: Option<u8>,

        /// Leave out uppercase letters
        #[arg(long)]
        no_uppercase: bool,

        /// Leave out lowercase letters
        #[arg(long)]
        no_lowercase: bool,

        /// Leave out digits
        #[arg(long)]
        no_numbers: bool,

        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,

        /// Exclude look-alike characters (i, l, 1, L, o, 0, O)
        #[arg(long)]
        exclude_similar: bool,

        /// How many passwords to generate
        #[arg(long, short = 'n', default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=HISTORY_LIMIT as i64))]
        count: u8,

        /// Copy the last generated password to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Score the strength of an existing password
    Analyze {
        /// Password to analyze
        #[arg(required = true)]
        password: String,
    },

    /// Show security tips and frequently asked questions
    Tips,
}

impl CliCommand {
    /// Apply `generate` flags on top of the configured defaults. Returns
    /// `None` for other commands.
    pub fn generation_settings(&self, defaults: &GenerationSettings) -> Option<GenerationSettings> {
        match self {
            CliCommand::Generate {
                length,
                no_uppercase,
                no_lowercase,
                no_numbers,
                no_symbols,
                exclude_similar,
                ..
            } => Some(GenerationSettings {
                length: length.map(usize::from).unwrap_or(defaults.length),
                include_uppercase: defaults.include_uppercase && !no_uppercase,
                include_lowercase: defaults.include_lowercase && !no_lowercase,
                include_numbers: defaults.include_numbers && !no_numbers,
                include_symbols: defaults.include_symbols && !no_symbols,
                exclude_similar: defaults.exclude_similar || *exclude_similar,
            }),
            _ => None,
        }
    }
}
