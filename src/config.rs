//! Runtime configuration.
//!
//! Settings come from an optional YAML file (`--config`) and are then
//! overridden by environment variables. Every field has a default, so the
//! tool runs without any file at all.
//!
//! ```yaml
//! fetch:
//!   max_pages: 50
//!   timeout_secs: 30
//! llm:
//!   model: gpt-3.5-turbo
//!   temperature: 0.8
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_MAX_PAGES: usize = 50;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchSettings,
    pub llm: LlmSettings,
}

/// Settings for the page client and the scrapers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Upper bound on archive pages followed through "next" links.
    pub max_pages: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Optional token for the Qiita API; anonymous requests are rate limited.
    pub qiita_access_token: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            qiita_access_token: None,
        }
    }
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for the chat-completion endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Parse a YAML document. Missing sections fall back to defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply environment overrides on top of the loaded values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(base) = lookup("OPENAI_BASE_URL") {
            self.llm.base_url = base;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.llm.model = model;
        }
        if let Some(token) = lookup("QIITA_ACCESS_TOKEN") {
            self.fetch.qiita_access_token = Some(token);
        }
        self
    }
}

/// Load configuration from `path` (if any), then apply environment overrides.
#[instrument(level = "debug")]
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            info!(path = %path.display(), "Loaded configuration");
            AppConfig::from_yaml(&yaml)?
        }
        None => {
            debug!("No config file given; using defaults");
            AppConfig::default()
        }
    };
    Ok(config.with_env_overrides())
}
