//! Widget and application configuration.
//!
//! The host hands the widget a single property, the ticker symbol
//! ([`WidgetConfig`]). Everything else the fetcher needs ([`AppConfig`]) is
//! layered: built-in defaults, then an optional TOML file, then
//! `STOCKCARD_*` environment variables. Secrets only ever come from the
//! file or the environment.

use std::path::Path;

use serde::Deserialize;
use stockcard_api::{ChartInterval, ChartQuery, ChartRange};
use thiserror::Error;

pub const DEFAULT_SYMBOL: &str = "MSFT";
pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

pub const ENV_BASE_URL: &str = "STOCKCARD_BASE_URL";
pub const ENV_API_KEY: &str = "STOCKCARD_API_KEY";
pub const ENV_DEFAULT_SYMBOL: &str = "STOCKCARD_DEFAULT_SYMBOL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Properties the host passes on `initialize` and `refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetConfig {
    pub symbol: String,
}

impl WidgetConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// The configured symbol, or `default` when the host left it blank.
    pub fn symbol_or<'a>(&'a self, default: &'a str) -> &'a str {
        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            default
        } else {
            symbol
        }
    }
}

/// Fetcher settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub default_symbol: String,
    pub interval: Option<ChartInterval>,
    pub range: Option<ChartRange>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            default_symbol: DEFAULT_SYMBOL.to_string(),
            interval: None,
            range: None,
        }
    }
}

/// On-disk layout of the TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    api_key: Option<String>,
    default_symbol: Option<String>,
    interval: Option<String>,
    range: Option<String>,
}

impl AppConfig {
    /// Defaults, then the file at `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = path {
            let content = std::fs::read_to_string(path)?;
            config.merge_toml(&content)?;
            tracing::debug!("Loaded config from {}", path.display());
        }
        config.merge_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlays the keys present in a TOML document.
    pub fn merge_toml(&mut self, content: &str) -> Result<(), ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(api_key) = file.api_key {
            self.api_key = Some(api_key);
        }
        if let Some(symbol) = file.default_symbol {
            self.default_symbol = symbol;
        }
        if let Some(interval) = file.interval {
            self.interval = Some(interval.parse().map_err(ConfigError::Invalid)?);
        }
        if let Some(range) = file.range {
            self.range = Some(range.parse().map_err(ConfigError::Invalid)?);
        }
        Ok(())
    }

    /// Overlays `STOCKCARD_*` variables. `lookup` abstracts the environment.
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(api_key) = non_empty(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(symbol) = non_empty(ENV_DEFAULT_SYMBOL) {
            self.default_symbol = symbol;
        }
        if self.default_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_symbol must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn chart_query(&self) -> ChartQuery {
        let mut query = ChartQuery::default();
        if let Some(interval) = self.interval {
            query = query.with_interval(interval);
        }
        if let Some(range) = self.range {
            query = query.with_range(range);
        }
        query
    }
}
