use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wiki_signature_engine::{ExtensionOptions, datetime::parse_offset};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid timezone offset '{0}', expected e.g. '+02:00' or 'Z'")]
    InvalidTimezone(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL links are built under, e.g. `/trac`.
    pub base_url: String,
    /// Offset for timestamps written without one, e.g. `+02:00`.
    pub timezone_offset: String,
    /// Register the `user:` and `full-username:` link namespaces.
    pub user_links: bool,
    /// Wiki pages treated as existing and viewable.
    pub known_pages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timezone_offset: "+00:00".to_string(),
            user_links: true,
            known_pages: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Fail on load rather than on first use
        config.timezone()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/wiki-signature");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn timezone(&self) -> Result<FixedOffset, ConfigError> {
        parse_offset(self.timezone_offset.trim())
            .ok_or_else(|| ConfigError::InvalidTimezone(self.timezone_offset.clone()))
    }

    pub fn extension_options(&self) -> ExtensionOptions {
        ExtensionOptions {
            user_links: self.user_links,
        }
    }
}
