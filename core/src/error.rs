use serde_json::Value;
use thiserror::Error;

use crate::client::ResponseBody;

/// Failure kinds for every operation against the Vapi API.
///
/// `Configuration` is fatal at startup. Every other kind is turned into an
/// error envelope at the tool boundary.
#[derive(Error, Debug)]
pub enum VapiError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request never completed (connect, TLS, timeout)
    #[error("HTTP error occurred: {0}")]
    Transport(String),

    /// The remote answered with a non-2xx status
    #[error("HTTP request failed with status: {status}")]
    Upstream { status: u16, body: ResponseBody },

    /// 2xx response whose embedded `status` disagrees with the expected value
    #[error("Call failed with status: {status}")]
    UnexpectedStatus { status: String, body: Value },

    #[error("Assistant with name '{0}' not found")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unexpected error occurred: {0}")]
    Unexpected(String),
}

impl VapiError {
    /// Stable machine-readable kind
    pub fn code(&self) -> &'static str {
        match self {
            VapiError::Configuration(_) => "CONFIGURATION_ERROR",
            VapiError::Transport(_) => "TRANSPORT_ERROR",
            VapiError::Upstream { .. } => "UPSTREAM_ERROR",
            VapiError::UnexpectedStatus { .. } => "UPSTREAM_ERROR",
            VapiError::NotFound(_) => "NOT_FOUND",
            VapiError::InvalidArguments(_) => "INVALID_ARGUMENTS",
            VapiError::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// Raw response body to attach to an error envelope, when there is one
    pub fn details(&self) -> Option<Value> {
        match self {
            VapiError::Upstream { body, .. } => Some(body.to_value()),
            VapiError::UnexpectedStatus { body, .. } => Some(body.clone()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for VapiError {
    fn from(e: serde_json::Error) -> Self {
        VapiError::Unexpected(e.to_string())
    }
}

pub type VapiResult<T> = Result<T, VapiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages() {
        assert_eq!(
            VapiError::NotFound("Billing Bot".to_string()).to_string(),
            "Assistant with name 'Billing Bot' not found"
        );
        assert_eq!(
            VapiError::Upstream {
                status: 503,
                body: ResponseBody::Text("down".to_string())
            }
            .to_string(),
            "HTTP request failed with status: 503"
        );
        assert_eq!(
            VapiError::UnexpectedStatus {
                status: "failed".to_string(),
                body: json!({"status": "failed"})
            }
            .to_string(),
            "Call failed with status: failed"
        );
    }

    #[test]
    fn test_details_only_for_upstream_kinds() {
        let upstream = VapiError::Upstream {
            status: 400,
            body: ResponseBody::Json(json!({"message": "bad"})),
        };
        assert_eq!(upstream.details(), Some(json!({"message": "bad"})));
        assert_eq!(upstream.code(), "UPSTREAM_ERROR");

        assert!(VapiError::Transport("refused".into()).details().is_none());
        assert!(VapiError::NotFound("x".into()).details().is_none());
    }
}
