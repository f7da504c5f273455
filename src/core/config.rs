//! # Configuration
//!
//! Environment-driven settings for the pipeline and the CLI.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add SHARE_BASE_URL and HTTP_TIMEOUT_SECS
//! - 1.0.0: Initial creation with API key, base URL and history path

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Public endpoint of the YouTube Data API v3
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default location of the persisted history list
pub const DEFAULT_HISTORY_PATH: &str = "playlist-history.json";

/// Default origin used when building share and embed links
pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:8080";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog credential, only required by commands that hit the network
    pub youtube_api_key: Option<String>,
    pub api_base_url: String,
    pub history_path: PathBuf,
    pub share_base_url: String,
    pub http_timeout: Duration,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            youtube_api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Build configuration from the process environment.
    ///
    /// Callers are expected to have loaded `.env` beforehand (see `dotenvy`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let youtube_api_key = lookup("YOUTUBE_API_KEY").filter(|key| !key.trim().is_empty());

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS must be a number, got '{}'", raw))?;
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        Ok(Config {
            youtube_api_key,
            api_base_url: lookup("YOUTUBE_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            history_path: lookup("PLAYLIST_HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_path),
            share_base_url: lookup("SHARE_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.share_base_url),
            http_timeout,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Return the API key or a descriptive error for network-bound commands
    pub fn require_api_key(&self) -> Result<&str> {
        self.youtube_api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("YOUTUBE_API_KEY is not set (add it to the environment or .env)"))
    }
}
