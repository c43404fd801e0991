//! Stargaze configuration.
//!
//! Loaded from `~/.stargaze/config.toml`. Every key is optional and a missing
//! file means defaults. The archive URL is resolved through a chain:
//!
//! 1. `--archive-url <url>`: explicit per-command override
//! 2. `STARGAZE_ARCHIVE_URL` env var
//! 3. `archive-url` in the config file
//! 4. [`DEFAULT_ARCHIVE_URL`]

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use jiff::civil::Date;
use serde::Deserialize;

use crate::archive::{DEFAULT_ARCHIVE_URL, HttpSettings};

/// Environment variable overriding the archive URL.
pub const ARCHIVE_URL_ENV: &str = "STARGAZE_ARCHIVE_URL";

/// Stargaze configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Where hourly dumps are downloaded from.
    pub archive_url: Option<String>,

    /// Whole-request timeout, in seconds.
    pub timeout_secs: u64,

    /// Time allowed to establish a connection, in seconds.
    pub connect_timeout_secs: u64,

    /// Default `--from` date.
    pub start_date: Option<Date>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_url: None,
            timeout_secs: 60,
            connect_timeout_secs: 15,
            start_date: None,
        }
    }
}

impl Config {
    /// Load config from `~/.stargaze/config.toml`, falling back to defaults.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.stargaze/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".stargaze").join("config.toml"))
    }

    /// Resolve the archive URL from the flag, environment, and file.
    pub fn archive_url(&self, explicit: Option<&str>) -> String {
        resolve_archive_url(explicit, env::var(ARCHIVE_URL_ENV).ok(), self)
    }

    /// HTTP settings for fetching from the archive.
    pub fn http_settings(&self, explicit_url: Option<&str>) -> HttpSettings {
        HttpSettings {
            base_url: self.archive_url(explicit_url),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn resolve_archive_url(explicit: Option<&str>, from_env: Option<String>, config: &Config) -> String {
    // 1. Explicit flag.
    if let Some(url) = explicit {
        return url.to_string();
    }

    // 2. Environment variable.
    if let Some(url) = from_env
        && !url.is_empty()
    {
        return url;
    }

    // 3. Config file, then 4. default.
    config
        .archive_url
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_ARCHIVE_URL.to_string())
}
