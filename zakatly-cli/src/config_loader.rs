//! Persistent CLI Configuration Loader
//!
//! Configuration is loaded from `~/.config/zakatly/config.toml` on Linux,
//! `~/Library/Application Support/zakatly/config.toml` on macOS
//! or `%APPDATA%\zakatly\config.toml` on Windows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable that overrides `api-token`.
pub const TOKEN_ENV_VAR: &str = "ZAKATLY_GOLDAPI_TOKEN";

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Currency code the rates are quoted in (e.g., "BDT", "USD").
    pub currency: Option<String>,
    /// GoldAPI access token.
    pub api_token: Option<String>,
    /// Override for the GoldAPI base URL.
    pub api_base_url: Option<String>,
    /// Request timeout for the rate feed. Unbounded when unset.
    pub timeout_seconds: Option<u64>,
    /// Manual 24K gold price per gram; skips the live feed when set with `silver-price`.
    pub gold_price: Option<Decimal>,
    /// Manual silver price per gram.
    pub silver_price: Option<Decimal>,
    /// Never contact the rate feed.
    pub offline: Option<bool>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
}

impl CliConfig {
    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zakatly"))
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Loads from the default location.
    ///
    /// A missing file or config directory yields defaults. A file that exists
    /// but cannot be read or parsed is an error; callers fall back to
    /// defaults once logging is up so the problem is reported.
    pub fn load() -> Result<Self, String> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("Could not determine config directory");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {:?}: {}", path, e))?;
        let config = toml::from_str::<CliConfig>(&content)
            .map_err(|e| format!("Failed to parse config file {:?}: {}", path, e))?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Unwraps a load result, logging the problem and using defaults on error.
    pub fn or_warn(loaded: Result<Self, String>) -> Self {
        loaded.unwrap_or_else(|e| {
            warn!("{}; using defaults", e);
            Self::default()
        })
    }

    /// Token from the environment, else from the file. Blank values count as unset.
    pub fn resolve_token(&self, env_token: Option<String>) -> Option<String> {
        env_token
            .or_else(|| self.api_token.clone())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// The configuration written by `zakatly init-config`.
    pub fn sample() -> Self {
        CliConfig {
            currency: Some("BDT".to_string()),
            api_token: Some(String::new()),
            api_base_url: None,
            timeout_seconds: Some(10),
            gold_price: None,
            silver_price: None,
            offline: Some(false),
            enable_logging: Some(false),
        }
    }

    /// Creates a sample configuration file at the default location.
    pub fn create_sample() -> Result<PathBuf, std::io::Error> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "Could not determine config directory")
        })?;
        Self::sample().save_to(&path)?;
        Ok(path)
    }
}
