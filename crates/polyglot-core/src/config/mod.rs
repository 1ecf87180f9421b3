mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::PolyglotError;
use defaults::*;

/// Top-level Polyglot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub polyglot: GeneralConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub jokes: JokesConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Root for logs and persisted data.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Translation table and locale preference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Directory holding `<locale>/common.json`.
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    /// File backing the `NEXT_LOCALE` preference.
    #[serde(default = "default_preference_file")]
    pub preference_file: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales_dir: default_locales_dir(),
            preference_file: default_preference_file(),
        }
    }
}

/// Remote translation API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_translation_base_url")]
    pub base_url: String,
    /// Upper bound on one remote call (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Lifetime of a cached translation (default: 300 = 5 minutes).
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: default_translation_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Joke API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JokesConfig {
    #[serde(default = "default_jokes_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for JokesConfig {
    fn default() -> Self {
        Self {
            base_url: default_jokes_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl JokesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, PolyglotError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| PolyglotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| PolyglotError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
