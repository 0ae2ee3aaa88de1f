//! ContactVault console entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and own the store for the session.
//! - Drive the numbered menu over stdin/stdout.

mod config;
mod menu;
mod prompt;

use clap::Parser;
use config::Config;
use contactvault_core::ContactStore;
use log::{error, info};
use menu::Menu;
use prompt::Prompter;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(err) = config.init_logging() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    let store = match ContactStore::open(&config.db) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Error: unable to open {}: {err}", config.db.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=session_start module=cli status=ok version={}",
        contactvault_core::core_version()
    );

    let prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    let session = Menu::new(&store, &prompter, &config.csv).run();

    let closed = store.close();
    match (session, closed) {
        (Ok(()), Ok(())) => ExitCode::SUCCESS,
        (Err(err), _) => {
            error!("event=session_end module=cli status=error error={err}");
            eprintln!("Error: console I/O failed: {err}");
            ExitCode::FAILURE
        }
        (Ok(()), Err(err)) => {
            eprintln!("Error: failed to close {}: {err}", config.db.display());
            ExitCode::FAILURE
        }
    }
}
