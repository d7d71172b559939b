use crate::assistant::CallPayload;
use crate::client::VapiClient;
use crate::envelope::Envelope;
use crate::error::{VapiError, VapiResult};
use crate::normalize::{self, QUEUED_STATUS};
use crate::resolver::AssistantResolver;
use crate::tools::{parse_arguments, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

pub const CALL_PATH: &str = "call";

/// Arguments of `make_call`
#[derive(Debug, Clone, Deserialize)]
pub struct CallRequest {
    /// Number to dial, E.164. Passed through unvalidated.
    pub phone_number: String,
    pub task: String,
    #[serde(default)]
    pub assistant_name: Option<String>,
}

/// Places an outbound call
pub struct MakeCallTool {
    client: Arc<VapiClient>,
    resolver: AssistantResolver,
}

impl MakeCallTool {
    pub fn new(client: Arc<VapiClient>) -> Self {
        Self {
            resolver: AssistantResolver::new(Arc::clone(&client)),
            client,
        }
    }

    /// Build the call payload, resolving the named assistant when given
    pub async fn build_payload(&self, request: &CallRequest) -> VapiResult<CallPayload> {
        let phone_number_id = &self.client.config().phone_number_id;

        match request.assistant_name.as_deref().filter(|n| !n.is_empty()) {
            None => Ok(CallPayload::inline(
                &request.task,
                &request.phone_number,
                phone_number_id,
            )),
            Some(name) => {
                let assistant = self.resolver.resolve(name).await?;
                let assistant_id = assistant.id().ok_or_else(|| {
                    VapiError::Unexpected(format!("Assistant '{}' has no id", name))
                })?;
                debug!(target: "make_call", assistant = %name, assistant_id = %assistant_id, "Using stored assistant");
                Ok(CallPayload::for_assistant(
                    assistant_id,
                    &request.task,
                    &request.phone_number,
                    phone_number_id,
                ))
            }
        }
    }

    pub async fn make_call(&self, request: CallRequest) -> VapiResult<Envelope> {
        info!(
            target: "make_call",
            phone_number = %request.phone_number,
            task = %request.task,
            assistant = request.assistant_name.as_deref().unwrap_or("<inline>"),
            "Making call"
        );

        let payload = self.build_payload(&request).await?;
        let response = self
            .client
            .post(CALL_PATH, &serde_json::to_value(&payload)?)
            .await?;
        let body = normalize::expect_status(response, QUEUED_STATUS)?;

        info!(
            target: "make_call",
            call_id = ?body.get("id"),
            "Call queued successfully"
        );

        Ok(normalize::queued_envelope(body))
    }
}

#[async_trait]
impl Tool for MakeCallTool {
    fn name(&self) -> String {
        "make_call".to_string()
    }

    fn description(&self) -> String {
        "Make an outbound call using VAPI. Args: phone_number (E.164 format), task (call prompt), \
         assistant_name (optional name of a stored assistant to use)"
            .to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "phone_number": {
                    "type": "string",
                    "description": "The phone number to call in E.164 format (e.g. '+15551234567')"
                },
                "task": {
                    "type": "string",
                    "description": "The task or prompt for the call"
                },
                "assistant_name": {
                    "type": "string",
                    "description": "Name of an existing assistant; when omitted an ad-hoc assistant is used"
                }
            },
            "required": ["phone_number", "task"]
        })
    }

    async fn execute(&self, arguments: Value) -> VapiResult<Envelope> {
        let request: CallRequest = parse_arguments(arguments)?;
        self.make_call(request).await
    }
}
