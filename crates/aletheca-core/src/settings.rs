//! Settings for an OpenAlex HTTP client
//!
//! These are declared here for the binaries and any client built on top of
//! the decoder; the decoder itself never reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Connection and politeness settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Exponential backoff factor between retries
    pub backoff_factor: f64,
    pub user_agent: String,
    /// Contact address for the OpenAlex polite pool
    pub email: String,
    /// Requests per second
    pub rate_limit: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openalex.org".to_string(),
            timeout_secs: 10,
            max_retries: 3,
            backoff_factor: 0.3,
            user_agent: "AlethecaClient/0.1.0".to_string(),
            email: String::new(),
            rate_limit: 10,
        }
    }
}

impl ClientSettings {
    /// `User-Agent` value, with a `mailto:` suffix when an email is set
    pub fn user_agent_header(&self) -> String {
        let email = self.email.trim();
        if email.is_empty() {
            self.user_agent.clone()
        } else {
            format!("{} (mailto:{email})", self.user_agent)
        }
    }

    /// Delay before retry `attempt` (0-based), in seconds
    pub fn backoff_secs(&self, attempt: u32) -> f64 {
        self.backoff_factor * 2f64.powi(attempt as i32)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(SettingsError::new(
                "api_base_url",
                format!("expected an http(s) URL, got {:?}", self.api_base_url),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(SettingsError::new("timeout_secs", "must be positive"));
        }
        if !self.backoff_factor.is_finite() || self.backoff_factor < 0.0 {
            return Err(SettingsError::new("backoff_factor", "must be a non-negative number"));
        }
        if self.rate_limit == 0 {
            return Err(SettingsError::new("rate_limit", "must be positive"));
        }
        Ok(())
    }
}

/// API feature toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Include xpac works (datasets, software, ... outside the core corpus)
    pub enable_xpac: bool,
    pub enable_data_v1: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            enable_xpac: true,
            enable_data_v1: false,
        }
    }
}

/// An invalid settings value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsError {
    pub field: &'static str,
    pub message: String,
}

impl SettingsError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for SettingsError {}
