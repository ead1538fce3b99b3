//! Run configuration

use crate::error::LinksError;
use crate::platform::retry::RetryConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Production API host serving tokens and catalogs
pub const DEFAULT_API_BASE: &str = "https://eu1-prod.disco-api.com";

/// Host serving playback info
pub const DEFAULT_PLAYBACK_BASE: &str = "https://sonic-eu1-prod.disco-api.com";

/// Fixed User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:98.0) Gecko/20100101 Firefox/98.0";

/// Realms the API hands out tokens for
pub const DEFAULT_REALMS: &[&str] = &["dmaxde", "hgtv", "tlcde"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Allowed realms, first one is the default
    pub realms: Vec<String>,
    /// Base URL for token and catalog requests
    pub api_base: String,
    /// Base URL for playback info requests
    pub playback_base: String,
    /// User agent string
    pub user_agent: String,
    /// Episodes per catalog page
    pub page_size: u32,
    /// HTTP timeout
    pub timeout: Duration,
    /// Program named in the generated download command
    pub downloader: String,
    /// Directory the spreadsheet is written to
    pub output_dir: PathBuf,
    /// Playback retry policy
    pub retry: RetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            realms: DEFAULT_REALMS.iter().map(|r| r.to_string()).collect(),
            api_base: DEFAULT_API_BASE.to_string(),
            playback_base: DEFAULT_PLAYBACK_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: 100,
            timeout: Duration::from_secs(30),
            downloader: "youtube-dl".to_string(),
            output_dir: PathBuf::from("."),
            retry: RetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Point both API hosts at the same base URL
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.api_base = base.to_string();
        self.playback_base = base.to_string();
        self
    }

    /// Set HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set downloader program
    pub fn with_downloader(mut self, downloader: &str) -> Self {
        self.downloader = downloader.to_string();
        self
    }

    /// Set output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Realm used when none is given
    pub fn default_realm(&self) -> Option<&str> {
        self.realms.first().map(String::as_str)
    }

    /// Check a realm against the allow-list
    pub fn validate_realm(&self, realm: &str) -> Result<(), LinksError> {
        if self.realms.iter().any(|r| r == realm) {
            Ok(())
        } else {
            Err(LinksError::InvalidArgument(format!(
                "unknown realm '{}'. Must be one of: {}",
                realm,
                self.realms.join(", ")
            )))
        }
    }
}
