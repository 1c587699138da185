//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use aletheca_core::{ApiSettings, ClientSettings};

/// Global configuration for aletheca
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub client: ClientSettings,
    pub api: ApiSettings,
    pub check: CheckConfig,
}

/// Defaults for `aletheca check`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Failures (and issues) listed before the rest are summarized
    pub max_failures_shown: usize,
    /// Decode JSON lines inputs on the rayon pool
    pub parallel: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_failures_shown: 20,
            parallel: true,
        }
    }
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./aletheca.toml (current directory)
    /// 2. ~/.config/aletheca/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("aletheca.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "aletheca") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse, expand `${VAR}` in the contact email, and validate.
    fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.client.email = expand_env_var(&config.client.email).unwrap_or_default();
        config.client.validate()?;
        Ok(config)
    }
}
