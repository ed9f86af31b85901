//! Per-client configuration.
//!
//! # Design
//! Configuration is an owned value handed to each client at construction.
//! Two clients never share it, so reconfiguring one cannot leak into
//! another. Every field is read-only while a call is in flight.

use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.jotform.com";
pub const LATEST_VERSION: &str = "latest";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for a Jotform client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// `"latest"` omits the version path segment; anything else becomes
    /// `/v{version}`.
    pub api_version: String,
    /// Log every outgoing verb and URL at `info` level.
    pub debug: bool,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_version: LATEST_VERSION.to_string(),
            debug: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from `JOTFORM_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults. Recognised keys: `JOTFORM_API_KEY`,
    /// `JOTFORM_BASE_URL`, `JOTFORM_API_VERSION`, `JOTFORM_DEBUG`,
    /// `JOTFORM_TIMEOUT_MS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(key) = lookup("JOTFORM_API_KEY") {
            config = config.with_api_key(key);
        }
        if let Some(url) = lookup("JOTFORM_BASE_URL") {
            config = config.with_base_url(&url);
        }
        if let Some(version) = lookup("JOTFORM_API_VERSION") {
            config = config.with_api_version(version);
        }
        if let Some(debug) = lookup("JOTFORM_DEBUG") {
            config.debug = parse_bool(&debug).ok_or_else(|| {
                ApiError::InvalidConfig(format!("JOTFORM_DEBUG must be a boolean, got {debug:?}"))
            })?;
        }
        if let Some(ms) = lookup("JOTFORM_TIMEOUT_MS") {
            let ms: u64 = ms.trim().parse().map_err(|_| {
                ApiError::InvalidConfig(format!("JOTFORM_TIMEOUT_MS must be an integer, got {ms:?}"))
            })?;
            config.timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// The configured key, treating blank strings as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// The version path segment, e.g. `Some("v1")`, or `None` for latest.
    pub fn version_segment(&self) -> Option<String> {
        let version = self.api_version.trim();
        if version.is_empty() || version == LATEST_VERSION {
            return None;
        }
        let version = version.trim_start_matches(|c| c == 'v' || c == 'V');
        Some(format!("v{version}"))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
