//! Binary entry point: resolve configuration, open the store, seed it when it
//! is empty, then hand the process over to the menu loop until the user exits.
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use shelf_track::integrity::audit_references;
use shelf_track::{close_store, open_store, run_menu, seed_if_empty, Cli, Config, Console};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let config = Config::from_cli(Cli::parse(), io::stdout().is_terminal());
    init_tracing(config.log_filter());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "fatal error");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Storage failures anywhere in the session end up here and stop the
/// process; the connection is dropped, and so closed, on the way out.
fn run(config: &Config) -> Result<()> {
    let conn = open_store(config.db_path())?;

    if config.seed() && seed_if_empty(&conn)? {
        println!("Sample books and authors added.\n");
    }
    let orphans = audit_references(&conn).context("failed to audit book references")?;
    if orphans > 0 {
        info!(orphans, "store contains books without an author");
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), config.color());
    run_menu(&conn, &mut console).context("session aborted")?;

    close_store(conn)
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
