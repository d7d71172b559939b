use crate::client::VapiClient;
use crate::envelope::{keys, Envelope};
use crate::error::{VapiError, VapiResult};
use crate::resolver::AssistantResolver;
use crate::tools::{parse_arguments, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct FindAssistantArgs {
    name: String,
}

/// Looks up one assistant by exact name
pub struct FindAssistantTool {
    resolver: AssistantResolver,
}

impl FindAssistantTool {
    pub fn new(client: Arc<VapiClient>) -> Self {
        Self {
            resolver: AssistantResolver::new(client),
        }
    }
}

#[async_trait]
impl Tool for FindAssistantTool {
    fn name(&self) -> String {
        "find_assistant".to_string()
    }

    fn description(&self) -> String {
        "Find a VAPI assistant by its exact (case-sensitive) name".to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Assistant name, matched exactly"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, arguments: Value) -> VapiResult<Envelope> {
        let args: FindAssistantArgs = parse_arguments(arguments)?;
        if args.name.is_empty() {
            return Err(VapiError::InvalidArguments("'name' must not be empty".to_string()));
        }

        let assistant = self.resolver.resolve(&args.name).await?;
        Ok(Envelope::success(format!("Found assistant '{}'", args.name))
            .with(keys::ASSISTANT, serde_json::to_value(assistant)?))
    }
}
