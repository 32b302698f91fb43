//! Tracing setup
//!
//! The terminal belongs to the UI, so logs go to a file. Nothing is installed
//! unless logging was asked for with `--verbose`, `--log-file` or the
//! `POSTLINE_LOG_LEVEL` environment variable.

use crate::config::{Settings, DEFAULT_LOG_PATH, LOG_LEVEL_ENV_VAR};
use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Filter directive to use, or `None` when logging stays off
pub fn log_directive(verbose: bool, log_file: Option<&str>, env_level: Option<&str>) -> Option<String> {
    match env_level {
        Some(level) if !level.trim().is_empty() => Some(level.trim().to_lowercase()),
        _ if verbose => Some("debug".to_string()),
        _ if log_file.is_some() => Some("info".to_string()),
        _ => None,
    }
}

/// Install the global subscriber. Returns whether logging was enabled.
pub fn init(settings: &Settings) -> Result<bool> {
    #[allow(clippy::disallowed_methods)]
    let env_level = std::env::var(LOG_LEVEL_ENV_VAR).ok();

    let Some(directive) = log_directive(
        settings.verbose,
        settings.log_file.as_deref(),
        env_level.as_deref(),
    ) else {
        return Ok(false);
    };

    let path = shellexpand::tilde(settings.log_file.as_deref().unwrap_or(DEFAULT_LOG_PATH))
        .into_owned();
    if let Some(parent) = Path::new(&path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create log directory for '{path}': {e}"))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file '{path}': {e}"))?;

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    tracing::info!("Logging to {} with filter '{}'", path, directive);
    Ok(true)
}
