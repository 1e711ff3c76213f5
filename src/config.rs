//! Configuration management for cruisecast
//!
//! Config is stored at ~/.config/cruisecast/config.toml. The API base URL
//! resolves as: command line, then `CRUISECAST_API_URL`, then the file,
//! then the local development server.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;
use crate::carousel::DEFAULT_INTERVAL;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "CRUISECAST_API_URL";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL, e.g. http://localhost:8000/api
    pub api_url: Option<String>,
    /// Seconds between carousel advances
    pub carousel_interval_secs: Option<u64>,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/cruisecast/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cruisecast").join("config.toml"))
    }

    /// Load config from the default path, or defaults if missing or unreadable
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }


    /// API base URL, honouring the override chain
    pub fn resolve_api_url(&self, cli_override: Option<&str>) -> String {
        self.resolve_api_url_with(cli_override, std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_url_with(&self, cli_override: Option<&str>, env: Option<String>) -> String {
        cli_override
            .map(str::to_string)
            .or(env.filter(|v| !v.trim().is_empty()))
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn carousel_interval(&self) -> Duration {
        match self.carousel_interval_secs {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => DEFAULT_INTERVAL,
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}
