/// Response normalization
///
/// Classifies a completed HTTP exchange. A 2xx response is only a success
/// when its embedded `status` field matches the expected value, so callers
/// that submit work (calls) use [`expect_status`] and plain reads use
/// [`expect_success`].
use crate::client::{ApiResponse, ResponseBody};
use crate::envelope::{keys, Envelope};
use crate::error::{VapiError, VapiResult};
use serde_json::Value;

/// `status` value of a call the remote accepted
pub const QUEUED_STATUS: &str = "queued";

/// Return the JSON body of a 2xx response.
pub fn expect_success(response: ApiResponse) -> VapiResult<Value> {
    if !response.is_success() {
        return Err(VapiError::Upstream {
            status: response.status,
            body: response.body,
        });
    }

    match response.body {
        ResponseBody::Json(body) => Ok(body),
        ResponseBody::Text(text) => Err(VapiError::Unexpected(format!(
            "Response body is not valid JSON (status {}): {}",
            response.status, text
        ))),
    }
}

/// Return the JSON body of a 2xx response whose `status` equals `expected`.
pub fn expect_status(response: ApiResponse, expected: &str) -> VapiResult<Value> {
    let body = expect_success(response)?;

    match body.get("status") {
        Some(Value::String(status)) if status == expected => Ok(body),
        other => {
            let status = match other {
                Some(Value::String(s)) => s.clone(),
                Some(value) => value.to_string(),
                None => "None".to_string(),
            };
            Err(VapiError::UnexpectedStatus { status, body })
        }
    }
}

/// Success envelope for a queued call
pub fn queued_envelope(body: Value) -> Envelope {
    let call_id = body.get("id").cloned().unwrap_or(Value::Null);
    Envelope::success("Call has been queued")
        .with(keys::CALL_ID, call_id)
        .with(keys::DETAILS, body)
}

/// Map a call-creation response straight to an envelope
pub fn normalize_call(response: ApiResponse) -> Envelope {
    match expect_status(response, QUEUED_STATUS) {
        Ok(body) => queued_envelope(body),
        Err(e) => e.into(),
    }
}
