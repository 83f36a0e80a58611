//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `farmhub.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Where the REST backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g. `http://localhost:8080/api`).
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Load from `farmhub.toml` (if present), then apply `FARMHUB_API_URL`
    /// and `FARMHUB_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable or malformed, or
    /// if the resulting values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("farmhub.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file, falling back to defaults when it does not exist.
    ///
    /// The file may hold the settings at the top level or under an `[api]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct File {
            api: Option<ApiConfig>,
            #[serde(flatten)]
            top: ApiConfig,
        }
        let file: File = toml::from_str(content)?;
        Ok(file.api.unwrap_or(file.top))
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("FARMHUB_API_URL") {
            self.base_url = val;
        }
        if let Some(val) = lookup("FARMHUB_API_TIMEOUT_SECS") {
            match val.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => tracing::warn!(value = %val, "ignoring unparsable FARMHUB_API_TIMEOUT_SECS"),
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "base_url must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
