//! Logging setup.
//!
//! Logs go to stderr by default. The interactive player owns the terminal,
//! so `--log-file` redirects logs to a file instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;

/// Map `-v` occurrences to a level (default: warnings only).
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let level = level_for(verbosity);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    Ok(())
}
