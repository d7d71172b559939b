use crate::envelope::Envelope;
use crate::error::{VapiError, VapiResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// The core trait for all tools exposed over MCP
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of the tool (e.g., "make_call")
    fn name(&self) -> String;

    /// A human-readable description of what the tool does
    fn description(&self) -> String;

    /// The JSON Schema for the tool's arguments
    fn parameters(&self) -> Value;

    /// Execute the tool, reporting failures by kind
    async fn execute(&self, arguments: Value) -> VapiResult<Envelope>;

    /// Execute the tool and fold any failure into an error envelope.
    ///
    /// Never fails: this is the boundary the protocol layer calls.
    async fn call(&self, arguments: Value) -> Envelope {
        match self.execute(arguments).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(
                    target: "tool",
                    tool = %self.name(),
                    kind = e.code(),
                    error = %e,
                    "Tool failed"
                );
                Envelope::from(e)
            }
        }
    }
}

/// Deserialize tool arguments, mapping failures to `InvalidArguments`.
///
/// A missing argument object is treated as `{}`.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> VapiResult<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| VapiError::InvalidArguments(e.to_string()))
}
