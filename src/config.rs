//! Run configuration and user settings.
//!
//! [`Settings`] holds optional defaults read from
//! `<config dir>/multi-get/config.toml`. [`Config`] is the validated record a
//! run works from; command-line flags take precedence over settings, which
//! take precedence over the built-in defaults.
use crate::error::ConfigError;
use crate::utils;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_COUNT: i64 = 4;
pub const DEFAULT_DESTINATION: &str = "multi-get.dest";

/// Optional defaults loaded from the user's config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub count: Option<i64>,
    pub destination: Option<String>,
    /// Per-request timeout in seconds. Unset means requests may wait forever.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    /// Require `206 Partial Content` for every part.
    pub strict: Option<bool>,
}

impl Settings {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("multi-get").join("config.toml"))
    }

    /// Loads the settings file. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Validated configuration of one run. The core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: Url,
    pub count: u32,
    /// Plain filename, created inside the working directory.
    pub destination: String,
}

impl Config {
    /// Validates raw input. Nothing touches the network before this succeeds.
    pub fn new(url: &str, count: i64, destination: &str) -> Result<Self, ConfigError> {
        let parsed = utils::parse_http_url(url).ok_or_else(|| ConfigError::InvalidUrl(url.into()))?;

        if !utils::is_valid_count(count) {
            return Err(ConfigError::InvalidCount(count));
        }
        let count = u32::try_from(count).map_err(|_| ConfigError::InvalidCount(count))?;

        if !utils::is_valid_destination(destination) {
            return Err(ConfigError::InvalidDestination(destination.into()));
        }

        Ok(Self {
            url: parsed,
            count,
            destination: destination.to_string(),
        })
    }

    /// Resolves flags against settings and validates the result.
    pub fn resolve(
        url: &str,
        count: Option<i64>,
        destination: Option<String>,
        settings: &Settings,
    ) -> Result<Self, ConfigError> {
        let count = count.or(settings.count).unwrap_or(DEFAULT_COUNT);
        let destination = destination
            .or_else(|| settings.destination.clone())
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string());

        Self::new(url, count, &destination)
    }
}
