//! Configuration
//!
//! Values come from an optional TOML file; the CLI overrides individual
//! fields from flags and environment variables.
//!
//! ```toml
//! lookback_days = 1
//! display = "url_only"
//! api_url = "https://github.example.com/api/v3"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::{DisplayMode, Error, LookbackWindow, Result};

/// Location of the config file when none is given
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/gh-today-pr/config.toml";

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page the events API serves
pub const MAX_PAGE_SIZE: u32 = 100;

/// The events API only covers the last 90 days
pub const MAX_LOOKBACK_DAYS: u32 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Calendar days before today to include
    pub lookback_days: u32,
    /// Events requested per page
    pub page_size: u32,
    /// Upper bound on event pages; the events API stops at 300 events
    pub max_pages: u32,
    /// Base URL of the REST API
    pub api_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Output format
    pub display: DisplayMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookback_days: 0,
            page_size: MAX_PAGE_SIZE,
            max_pages: 3,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            display: DisplayMode::Full,
        }
    }
}

impl Config {
    /// Load from `path`, or from [`DEFAULT_CONFIG_PATH`] when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let explicit = path.is_some();
        let raw = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let expanded = shellexpand::tilde(raw).to_string();
        let path = Path::new(&expanded);

        if !path.exists() {
            if explicit {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "Loading config file");
        Self::from_toml_file(path)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(Error::Config(format!(
                "lookback_days must be at most {}, got {}",
                MAX_LOOKBACK_DAYS, self.lookback_days
            )));
        }
        if self.max_pages == 0 {
            return Err(Error::Config("max_pages must be at least 1".to_string()));
        }
        if self.api_url.trim().is_empty() {
            return Err(Error::Config("api_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn window(&self) -> LookbackWindow {
        LookbackWindow::new(self.lookback_days)
    }
}
