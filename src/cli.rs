//! # CLI Execution
//!
//! Extracted from `main.rs` to keep the entry point slim. Wires the process's
//! stdin/stdout into a [`Session`] and turns end of input into a clean exit.

use anyhow::{Context, Result};
use judo_roster::prompt::{PromptError, Prompter};
use judo_roster::session::Session;
use judo_roster::store::Store;
use std::io;
use tracing::info;

use super::Cli;

/// Run one interactive session against the console.
pub fn run_session(cli: &Cli) -> Result<()> {
    info!(store = %cli.store.display(), "judo-roster starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let prompter = Prompter::new(stdin.lock(), stdout.lock());
    let mut session = Session::new(prompter, Store::new(&cli.store));

    match session.run() {
        Ok(()) => Ok(()),
        Err(PromptError::Closed) => {
            info!(
                registered = session.athletes().len(),
                "input closed, ending session"
            );
            Ok(())
        }
        Err(PromptError::Io(e)) => Err(e).context("console I/O failed"),
    }
}
