/// Vapi HTTP client
///
/// Thin wrapper over `reqwest` that adds bearer auth, the fixed request
/// timeout, and keeps "request never completed" apart from "request
/// completed with an error body".
use crate::config::VapiConfig;
use crate::error::{VapiError, VapiResult};
use reqwest::{Method, Url};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    /// Body that failed to parse as JSON, kept verbatim
    Text(String),
}

impl ResponseBody {
    fn decode(raw: String) -> Self {
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ResponseBody::Json(value) => value.clone(),
            ResponseBody::Text(text) => Value::String(text.clone()),
        }
    }
}

/// A completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self::new(status, ResponseBody::Json(body))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for the Vapi REST API
#[derive(Debug, Clone)]
pub struct VapiClient {
    config: Arc<VapiConfig>,
    http_client: reqwest::Client,
}

impl VapiClient {
    pub fn new(config: VapiConfig) -> VapiResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("vapi-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                VapiError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    pub fn config(&self) -> &VapiConfig {
        &self.config
    }

    pub async fn get(&self, path: &str) -> VapiResult<ApiResponse> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> VapiResult<ApiResponse> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// GET one record of a collection, e.g. `phone-number/{id}`.
    ///
    /// The id is appended as a single percent-encoded path segment, so it can
    /// never address a different endpoint.
    pub async fn get_record(&self, collection: &str, id: &str) -> VapiResult<ApiResponse> {
        let url = self.record_url(collection, id)?;
        self.send_url(Method::GET, url, None).await
    }

    fn record_url(&self, collection: &str, id: &str) -> VapiResult<Url> {
        if matches!(id.trim(), "" | "." | "..") {
            return Err(VapiError::InvalidArguments(format!(
                "'{}' is not a valid record id",
                id
            )));
        }

        let mut url = self.parse_url(collection)?;
        url.path_segments_mut()
            .map_err(|_| {
                VapiError::Configuration(format!(
                    "Base URL cannot take a path: {}",
                    self.config.base_url
                ))
            })?
            .push(id);
        Ok(url)
    }

    fn parse_url(&self, path: &str) -> VapiResult<Url> {
        let raw = self.config.url(path);
        Url::parse(&raw)
            .map_err(|e| VapiError::Configuration(format!("Invalid API URL {}: {}", raw, e)))
    }

    /// GET a collection endpoint and return its items.
    ///
    /// Only the first page is read; the listing endpoints are assumed to be
    /// unpaginated.
    pub async fn get_list(&self, path: &str) -> VapiResult<Vec<Value>> {
        let response = self.get(path).await?;
        match crate::normalize::expect_success(response)? {
            Value::Array(items) => Ok(items),
            other => Err(VapiError::Unexpected(format!(
                "Expected a JSON array from /{}, got {}",
                path.trim_start_matches('/'),
                json_kind(&other)
            ))),
        }
    }

    /// Issue a request and decode the body
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> VapiResult<ApiResponse> {
        let url = self.parse_url(path)?;
        self.send_url(method, url, body).await
    }

    async fn send_url(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> VapiResult<ApiResponse> {
        debug!(target: "vapi_client", method = %method, url = %url, "Sending request");

        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .bearer_auth(&self.config.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|e| {
            warn!(target: "vapi_client", method = %method, url = %url, error = %e, "Request failed");
            VapiError::Transport(e.to_string())
        })?;

        let status = resp.status().as_u16();
        let raw = resp.text().await.map_err(|e| {
            warn!(target: "vapi_client", url = %url, error = %e, "Failed to read response body");
            VapiError::Transport(format!("Failed to read response body: {}", e))
        })?;

        debug!(target: "vapi_client", method = %method, url = %url, status, "Received response");

        Ok(ApiResponse::new(status, ResponseBody::decode(raw)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
