//! Application configuration at `<config dir>/coding-coach/coach.toml`.
//!
//! Built once at startup and passed by reference into every component.
//! Environment variables (optionally from a `.env` file) override file values.

pub mod models;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoachError;
pub use models::{ModelConfig, ModelProvider};

const APP_DIR: &str = "coding-coach";
const CONFIG_FILE: &str = "coach.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub storage: StorageConfig,
    pub email: EmailConfig,
}

/// Where the history, selected problem and catalog live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for relative file names. Overridden by COACH_DATA_DIR.
    pub data_dir: Option<PathBuf>,
    pub history_file: PathBuf,
    pub selected_file: PathBuf,
    pub catalog_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: None,
            history_file: PathBuf::from("all_attempts.json"),
            selected_file: PathBuf::from("selected_problem.json"),
            catalog_file: PathBuf::from("leetcode_question.csv"),
        }
    }
}

impl StorageConfig {
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir().join(file)
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.resolve(&self.history_file)
    }

    pub fn selected_path(&self) -> PathBuf {
        self.resolve(&self.selected_file)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.resolve(&self.catalog_file)
    }
}

/// Email recipient and transport credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Overridden by TO_EMAIL
    pub recipient: Option<String>,
    /// Opaque bearer token for the mail API. Overridden by GMAIL_ACCESS_TOKEN.
    pub access_token: Option<String>,
    /// File holding the token, read when `access_token` is unset
    pub token_file: Option<PathBuf>,
    /// Timeout for the mail API request. No timeout when unset.
    pub request_timeout_secs: Option<u64>,
}

/// Default config location in the platform config directory
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl AppConfig {
    /// Load configuration from a TOML file, returning defaults if the file
    /// does not exist. Process environment overrides are applied afterwards.
    pub fn load(path: &Path) -> Result<Self, CoachError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, CoachError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            CoachError::config(format!("Failed to read config file: {}", e))
                .with_context(format!("path: {}", path.display()))
        })?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| CoachError::from(e).with_context(format!("path: {}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply overrides from an environment lookup. Blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GOOGLE_API_KEY") {
            self.model.api_key = Some(key);
        }
        if let Some(to) = get("TO_EMAIL") {
            self.email.recipient = Some(to);
        }
        if let Some(token) = get("GMAIL_ACCESS_TOKEN") {
            self.email.access_token = Some(token);
        }
        if let Some(dir) = get("COACH_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn require_api_key(&self) -> Result<&str, CoachError> {
        non_blank(self.model.api_key.as_ref())
            .ok_or_else(|| CoachError::config("Missing model API key (set GOOGLE_API_KEY or model.api_key)"))
    }

    pub fn require_recipient(&self) -> Result<&str, CoachError> {
        non_blank(self.email.recipient.as_ref())
            .ok_or_else(|| CoachError::config("Missing recipient address (set TO_EMAIL or email.recipient)"))
    }

    /// Resolve the transport token from config or token file
    pub fn require_access_token(&self) -> Result<String, CoachError> {
        if let Some(token) = non_blank(self.email.access_token.as_ref()) {
            return Ok(token.to_string());
        }
        if let Some(ref path) = self.email.token_file {
            let token = std::fs::read_to_string(path).map_err(|e| {
                CoachError::config(format!("Failed to read token file: {}", e))
                    .with_context(format!("path: {}", path.display()))
            })?;
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
        Err(CoachError::config(
            "Missing mail transport credentials (set GMAIL_ACCESS_TOKEN, email.access_token or email.token_file)",
        ))
    }
}
