use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::VapiError;

/// Reserved envelope keys.
pub mod keys {
    /// `"success"` or `"error"`
    pub const STATUS: &str = "status";
    /// Human-readable outcome
    pub const MESSAGE: &str = "message";
    /// Remote call identifier (`make_call`)
    pub const CALL_ID: &str = "call_id";
    /// Raw remote response body
    pub const DETAILS: &str = "details";
    /// Phone-number record (`get_phone_number`)
    pub const PHONE_NUMBER: &str = "phone_number";
    /// Assistant summaries (`list_assistants`)
    pub const ASSISTANTS: &str = "assistants";
    /// Single assistant summary (`find_assistant`)
    pub const ASSISTANT: &str = "assistant";
}

/// Uniform result returned by every tool.
///
/// Serializes as a flat JSON object whose `status` field is `"success"` or
/// `"error"`; success payload fields sit next to `message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        message: String,
        #[serde(flatten)]
        payload: Map<String, Value>,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
    },
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Envelope::Success {
            message: message.into(),
            payload: Map::new(),
        }
    }

    pub fn error(message: impl Into<String>, details: Option<Value>) -> Self {
        Envelope::Error {
            message: message.into(),
            details,
        }
    }

    /// Attach a payload field. No-op on error envelopes.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Envelope::Success { payload, .. } = &mut self {
            payload.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Envelope::Success { message, .. } | Envelope::Error { message, .. } => message,
        }
    }

    /// Payload field lookup, success envelopes only
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Envelope::Success { payload, .. } => payload.get(key),
            Envelope::Error { .. } => None,
        }
    }

    pub fn to_value(&self) -> Value {
        // Map keys are strings and every payload is already a Value
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({
                "status": "error",
                "message": format!("Unexpected error occurred: {}", e),
            })
        })
    }
}

impl From<VapiError> for Envelope {
    fn from(err: VapiError) -> Self {
        let details = err.details();
        Envelope::error(err.to_string(), details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serializes_flat() {
        let env = Envelope::success("Call has been queued")
            .with(keys::CALL_ID, "abc123")
            .with(keys::DETAILS, json!({"id": "abc123"}));

        assert_eq!(
            env.to_value(),
            json!({
                "status": "success",
                "message": "Call has been queued",
                "call_id": "abc123",
                "details": {"id": "abc123"}
            })
        );
    }

    #[test]
    fn test_error_omits_missing_details() {
        let env: Envelope = VapiError::NotFound("Billing Bot".to_string()).into();
        assert_eq!(
            env.to_value(),
            json!({
                "status": "error",
                "message": "Assistant with name 'Billing Bot' not found"
            })
        );
        assert!(!env.is_success());
    }

    #[test]
    fn test_with_ignored_on_error() {
        let env = Envelope::error("boom", None).with(keys::CALL_ID, "x");
        assert!(env.get(keys::CALL_ID).is_none());
        assert_eq!(env.message(), "boom");
    }
}
