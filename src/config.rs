//! Configuration constants and profile loading for postline
//!
//! Settings are resolved from the command line first, then from the named
//! section of the INI profile file, then from built-in defaults.

use crate::cmd_args::CommandLineArgs;
use anyhow::Result;
use ini::Ini;
use std::path::Path;
use std::time::Duration;

/// Default profile file path for postline
pub const DEFAULT_PROFILE_PATH: &str = "~/.postline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "POSTLINE_PROFILE_PATH";

/// Environment variable holding a tracing filter directive
pub const LOG_LEVEL_ENV_VAR: &str = "POSTLINE_LOG_LEVEL";

/// Default log file, used when logging is enabled without `--log-file`
pub const DEFAULT_LOG_PATH: &str = "~/.postline/postline.log";

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How long the users/posts load error banner stays up
pub const LIST_ERROR_DISPLAY: Duration = Duration::from_secs(3);

/// Delay before a comment whose deletion failed reappears
pub const DELETE_ROLLBACK_DELAY: Duration = Duration::from_secs(1);

/// How long the delete failure banner stays up after the rollback
pub const DELETE_ERROR_DISPLAY: Duration = Duration::from_secs(1);

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Values read from one profile section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Load profile `name` from the INI file at `path`
///
/// A missing file or section is not an error and yields `None`.
pub fn load_profile(name: &str, path: &str) -> Result<Option<Profile>> {
    let expanded = shellexpand::tilde(path).into_owned();
    if !Path::new(&expanded).exists() {
        tracing::debug!("Profile file '{}' not found", expanded);
        return Ok(None);
    }

    let ini = Ini::load_from_file(&expanded)
        .map_err(|e| anyhow::anyhow!("Failed to read profile file '{expanded}': {e}"))?;

    let Some(section) = ini.section(Some(name)) else {
        tracing::debug!("Profile '{}' not found in '{}'", name, expanded);
        return Ok(None);
    };

    let timeout_secs = match section.get("timeout_secs") {
        Some(value) => Some(value.trim().parse::<u64>().map_err(|e| {
            anyhow::anyhow!("Invalid timeout_secs '{value}' in profile '{name}': {e}")
        })?),
        None => None,
    };

    Ok(Some(Profile {
        base_url: section
            .get("base_url")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty()),
        timeout_secs,
    }))
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub verbose: bool,
    pub log_file: Option<String>,
}

impl Settings {
    /// Merge command line arguments over a profile over defaults
    pub fn resolve(args: &CommandLineArgs, profile: Option<&Profile>) -> Self {
        let base_url = args
            .base_url()
            .map(str::to_string)
            .or_else(|| profile.and_then(|p| p.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = profile
            .and_then(|p| p.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            verbose: args.verbose(),
            log_file: args.log_file().map(str::to_string),
        }
    }

    /// Resolve settings using the profile file from the environment or default path
    pub fn load(args: &CommandLineArgs) -> Result<Self> {
        let profile_path = get_profile_path();
        let profile = load_profile(args.profile(), &profile_path)?;
        Ok(Self::resolve(args, profile.as_ref()))
    }
}
