//! # Main — CLI Entry Point
//!
//! Starts an interactive registration session on stdin/stdout. There are no
//! subcommands; the only options configure where the roster is kept.
//!
//! ## Options
//!
//! - `--store` / `JUDO_STORE`: JSON roster file (default `athletes.json`).
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`, filtered by `RUST_LOG`
//! (default `warn`, so the console dialogue stays readable). Set
//! `LOG_FORMAT=json` for machine-readable lines.

mod cli;

use anyhow::Result;
use clap::Parser;
use judo_roster::store::DEFAULT_STORE_FILE;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "judo-roster",
    about = "Register club athletes, check weight categories, and estimate monthly costs"
)]
struct Cli {
    /// Path to the athlete roster file
    #[arg(long, env = "JUDO_STORE", default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::run_session(&cli)
}
