use std::fmt;
use std::time::Duration;

use crate::error::{VapiError, VapiResult};

/// Default Vapi REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.vapi.ai";

/// Fixed per-request timeout used when `VAPI_TIMEOUT_MS` is unset
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const API_KEY_VAR: &str = "VAPI_API_KEY";
pub const PHONE_NUMBER_ID_VAR: &str = "VAPI_PHONE_NUMBER_ID";
pub const BASE_URL_VAR: &str = "VAPI_BASE_URL";
pub const TIMEOUT_MS_VAR: &str = "VAPI_TIMEOUT_MS";

/// Credentials and endpoint settings for the Vapi API.
///
/// Built once at startup and shared immutably by every component that
/// talks to the remote API.
#[derive(Clone)]
pub struct VapiConfig {
    /// Bearer token sent on every request
    pub api_key: String,
    /// Outbound phone-number identifier used as the caller for new calls
    pub phone_number_id: String,
    /// API root, without trailing slash
    pub base_url: String,
    /// Timeout for a single HTTP request in milliseconds
    pub request_timeout_ms: u64,
}

impl VapiConfig {
    pub fn new(api_key: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            phone_number_id: phone_number_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Missing credentials are a [`VapiError::Configuration`], which callers
    /// treat as fatal.
    pub fn from_env() -> VapiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (env, test maps, ...)
    pub fn from_lookup<F>(lookup: F) -> VapiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let (api_key, phone_number_id) =
            match (non_empty(API_KEY_VAR), non_empty(PHONE_NUMBER_ID_VAR)) {
                (Some(key), Some(id)) => (key, id),
                _ => {
                    return Err(VapiError::Configuration(format!(
                        "{} and {} must be set",
                        API_KEY_VAR, PHONE_NUMBER_ID_VAR
                    )))
                }
            };

        let base_url = non_empty(BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout_ms = match non_empty(TIMEOUT_MS_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(VapiError::Configuration(format!(
                        "{} must be greater than zero",
                        TIMEOUT_MS_VAR
                    )))
                }
                Ok(ms) => ms,
                Err(e) => {
                    return Err(VapiError::Configuration(format!(
                        "Invalid {}: {} ({})",
                        TIMEOUT_MS_VAR, raw, e
                    )))
                }
            },
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            api_key,
            phone_number_id,
            base_url,
            request_timeout_ms,
        })
    }

    /// Point the client at a different API root (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Absolute URL for an API path such as `call` or `/phone-number/abc`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

// Keep the bearer token out of logs
impl fmt::Debug for VapiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VapiConfig")
            .field("api_key", &"<redacted>")
            .field("phone_number_id", &self.phone_number_id)
            .field("base_url", &self.base_url)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}
