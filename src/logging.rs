//! Logging through `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the TUI while the app runs, so records go to a log
//! file in the local data directory. `RUST_LOG` takes precedence over the
//! configured level.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_NAME: &str = "verse-sprout.log";

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or `debug`.
    pub level: String,
    pub log_file: PathBuf,
}

impl LogConfig {
    pub fn in_dir(dir: &Path, level: &str) -> Self {
        Self {
            level: level.to_string(),
            log_file: dir.join(LOG_FILE_NAME),
        }
    }
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    fmt()
        .with_env_filter(build_env_filter(&config.level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_the_given_dir() {
        let config = LogConfig::in_dir(Path::new("/tmp/vs"), "debug");
        assert_eq!(config.log_file, Path::new("/tmp/vs").join(LOG_FILE_NAME));
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn configured_level_applies_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(build_env_filter("debug").to_string(), "debug");
        }
    }
}
