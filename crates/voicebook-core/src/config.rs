//! Configuration for the VoiceBook pipeline.
//!
//! Settings are read from `~/.config/voicebook/config.toml` when present.
//! The NLU credential comes from the `API_KEY` environment variable; without
//! it the pipeline runs on the offline keyword matcher.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, VoicebookError};

/// Environment variable holding the NLU access credential.
pub const API_KEY_ENV: &str = "API_KEY";

fn default_model_name() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

/// Settings for the hosted NLU model.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NluSettings {
    /// Access credential. Never written back to disk.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Total attempts per command, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

impl Default for NluSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: default_model_name(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

impl NluSettings {
    /// Returns the credential if one is configured and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

// The credential must not end up in logs through `{:?}`.
impl std::fmt::Debug for NluSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NluSettings")
            .field("api_key", &self.credential().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("max_attempts", &self.max_attempts)
            .field("initial_backoff_ms", &self.initial_backoff_ms)
            .finish()
    }
}

/// Root configuration structure for config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoicebookConfig {
    #[serde(default)]
    pub nlu: NluSettings,
}

impl VoicebookConfig {
    /// Loads the default config file and applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Loads a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("[Config] No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            VoicebookError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)?;
        tracing::debug!("[Config] Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Overrides the credential when the environment provides one.
    pub fn apply_env(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.nlu.api_key = Some(key);
        }
    }
}

/// Returns the path to the configuration file: ~/.config/voicebook/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("voicebook").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = VoicebookConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, VoicebookConfig::default());
        assert_eq!(config.nlu.max_attempts, 5);
        assert_eq!(config.nlu.initial_backoff(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[nlu]\nmodel_name = \"gemini-2.5-pro\"\n").unwrap();

        let config = VoicebookConfig::load_from(&path).unwrap();
        assert_eq!(config.nlu.model_name, "gemini-2.5-pro");
        assert_eq!(config.nlu.initial_backoff_ms, 1000);
        assert!(config.nlu.credential().is_none());
    }

    #[test]
    fn test_invalid_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[nlu\nmodel_name = ").unwrap();

        let err = VoicebookConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, VoicebookError::Serialization { .. }));
    }

    #[test]
    fn test_env_credential_override() {
        let mut config = VoicebookConfig::default();
        config.apply_env(Some("   ".to_string()));
        assert!(config.nlu.credential().is_none());

        config.apply_env(Some("secret-key".to_string()));
        assert_eq!(config.nlu.credential(), Some("secret-key"));
    }

    #[test]
    fn test_credential_is_redacted_and_not_serialized() {
        let mut config = VoicebookConfig::default();
        config.apply_env(Some("secret-key".to_string()));

        assert!(!format!("{:?}", config).contains("secret-key"));
        assert!(!toml::to_string(&config).unwrap().contains("secret-key"));
    }
}
