//! Application configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use campus_ui::format::NumberLocale;
use log::{LevelFilter, debug};
use serde::{Deserialize, Serialize};

use crate::payment::PollConfig;

/// Environment variable overriding [`AppConfig::api_url`].
pub const ENV_API_URL: &str = "CAMPUS_API_URL";
/// Environment variable overriding [`AppConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "CAMPUS_LOG_LEVEL";

/// Errors while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Application settings, stored as JSON.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use campus::AppConfig;
///
/// let config = AppConfig::default()
///     .with_page_size(20)
///     .with_poll_delay(Duration::from_millis(500));
/// assert_eq!(config.page_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL.
    pub api_url: String,

    /// Currency prefix for price columns.
    ///
    /// Default: `$`
    pub currency_symbol: String,

    /// Number formatting locale tag.
    ///
    /// Default: `en-US`
    pub locale: String,

    /// Rows per page in tables.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Choices in the page size menu.
    pub page_size_options: Vec<usize>,

    /// Cards per row in card view, 1 to 4.
    pub card_grid_cols: u8,

    /// Payment status lookups before giving up.
    ///
    /// Default: 5
    pub payment_poll_attempts: u32,

    /// Milliseconds between payment status lookups.
    ///
    /// Default: 2000
    pub payment_poll_delay_ms: u64,

    /// `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            currency_symbol: "$".to_string(),
            locale: "en-US".to_string(),
            page_size: 10,
            page_size_options: vec![10, 20, 30, 40, 50],
            card_grid_cols: 3,
            payment_poll_attempts: 5,
            payment_poll_delay_ms: 2000,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`, then apply environment overrides.
    ///
    /// A missing file yields the defaults. A file that exists but does not
    /// parse is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_file(path)?
            .with_env(|key| std::env::var(key).ok())
            .validated()
    }

    /// Load from `path` without environment overrides.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(write_err)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            debug!("api url overridden from {ENV_API_URL}");
            self.api_url = url;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
        self
    }

    /// Check value ranges.
    pub fn validated(self) -> Result<Self, ConfigError> {
        url::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::invalid("api_url", e.to_string()))?;
        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size", "must be positive"));
        }
        if self.page_size_options.is_empty() || self.page_size_options.contains(&0) {
            return Err(ConfigError::invalid(
                "page_size_options",
                "must be a non-empty list of positive sizes",
            ));
        }
        if !(1..=4).contains(&self.card_grid_cols) {
            return Err(ConfigError::invalid("card_grid_cols", "must be 1 to 4"));
        }
        if self.payment_poll_attempts == 0 {
            return Err(ConfigError::invalid("payment_poll_attempts", "must be positive"));
        }
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::invalid("log_level", self.log_level.clone()))?;
        Ok(self)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = tag.into();
        self
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn with_card_grid_cols(mut self, cols: u8) -> Self {
        self.card_grid_cols = cols;
        self
    }

    pub fn with_poll_attempts(mut self, attempts: u32) -> Self {
        self.payment_poll_attempts = attempts;
        self
    }

    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.payment_poll_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Parsed log level, `Info` when unrecognised.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn number_locale(&self) -> NumberLocale {
        NumberLocale::from_tag(&self.locale)
    }

    /// Payment polling settings.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::default()
            .max_attempts(self.payment_poll_attempts)
            .delay(Duration::from_millis(self.payment_poll_delay_ms))
    }
}
