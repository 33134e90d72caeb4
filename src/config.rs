use std::path::{Path, PathBuf};

use clap::Parser;

/// Interactive book and author inventory backed by a SQLite file.
#[derive(Debug, Parser)]
#[command(name = "shelf-track", version)]
pub struct Cli {
    /// Database file, created when missing
    #[arg(long, env = "SHELF_TRACK_DB", default_value = "ebookstore.db")]
    pub db: PathBuf,

    /// Do not load the sample catalogue into an empty store
    #[arg(long)]
    pub no_seed: bool,

    /// Disable colored status messages
    #[arg(long)]
    pub no_color: bool,

    /// Tracing filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    db_path: PathBuf,
    seed: bool,
    color: bool,
    log_filter: String,
}

impl Config {
    /// Color is only used when stdout is a terminal and not switched off.
    pub fn from_cli(cli: Cli, stdout_is_terminal: bool) -> Self {
        Self {
            db_path: cli.db,
            seed: !cli.no_seed,
            color: stdout_is_terminal && !cli.no_color,
            log_filter: cli.log_level,
        }
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    #[must_use]
    pub const fn seed(&self) -> bool {
        self.seed
    }

    #[must_use]
    pub const fn color(&self) -> bool {
        self.color
    }

    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "shelf-track",
            "--db",
            "/tmp/shop.db",
            "--no-seed",
            "--no-color",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = Config::from_cli(cli, true);

        assert_eq!(config.db_path(), Path::new("/tmp/shop.db"));
        assert!(!config.seed());
        assert!(!config.color());
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn color_needs_a_terminal() {
        let cli = Cli::try_parse_from(["shelf-track", "--db", "x.db"]).unwrap();
        let config = Config::from_cli(cli, false);
        assert!(config.seed());
        assert!(!config.color());
    }
}
