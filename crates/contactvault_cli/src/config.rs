//! Command-line and environment configuration for the console.
//!
//! # Responsibility
//! - Resolve store, export and logging settings from flags or `CONTACTVAULT_*`.
//! - Start file logging only when a log directory is configured.
//!
//! # Invariants
//! - Flags win over environment variables, which win over defaults.
//! - Defaults point at files in the working directory.

use clap::Parser;
use contactvault_core::default_log_level;
use std::path::PathBuf;

/// Command-line and environment configuration.
#[derive(Parser, Debug)]
#[command(
    name = "contactvault",
    version,
    about = "Interactive contact address book backed by SQLite"
)]
pub struct Config {
    /// SQLite store file, created on first use
    #[arg(long, env = "CONTACTVAULT_DB", default_value = "Contacts.db")]
    pub db: PathBuf,

    /// Destination of "Export to CSV"
    #[arg(long, env = "CONTACTVAULT_CSV", default_value = "Contacts.csv")]
    pub csv: PathBuf,

    /// Directory for rolling log files; logging stays off when unset
    #[arg(long, env = "CONTACTVAULT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CONTACTVAULT_LOG_LEVEL", default_value_t = default_log_level().to_string())]
    pub log_level: String,
}

impl Config {
    /// Starts file logging when a log directory is configured.
    ///
    /// A relative directory is resolved against the working directory.
    pub fn init_logging(&self) -> Result<(), String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(());
        };

        let log_dir = std::path::absolute(log_dir)
            .map_err(|err| format!("cannot resolve log directory `{}`: {err}", log_dir.display()))?;
        contactvault_core::init_logging(&self.log_level, log_dir)
    }
}
