//! Configuration loading and validation for Lectern.
//!
//! Loads configuration from a TOML file with environment variable
//! overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `lectern.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anthropic API key (usually supplied via `ANTHROPIC_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Custom API base URL (for proxies and tests)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Sampling temperature; kept at zero so tool-round behavior is
    /// deterministic
    #[serde(default)]
    pub temperature: f32,

    /// Output-token cap per generation call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum tool rounds per query
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Exchanges of conversation history kept per session
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Maximum search hits per content search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".into()
}
fn default_max_tokens() -> u32 {
    800
}
fn default_max_rounds() -> usize {
    2
}
fn default_max_history() -> usize {
    2
}
fn default_max_results() -> usize {
    5
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_rounds", &self.max_rounds)
            .field("max_history", &self.max_history)
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: None,
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            max_rounds: default_max_rounds(),
            max_history: default_max_history(),
            max_results: default_max_results(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `lectern.toml` in the working directory,
    /// then apply environment overrides:
    /// - `ANTHROPIC_API_KEY` — API key (when the file sets none)
    /// - `LECTERN_MODEL` — model identifier
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(Path::new("lectern.toml"))?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        }
        if let Ok(model) = std::env::var("LECTERN_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 1.0".into(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "max_rounds must be at least 1".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "max_results must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
