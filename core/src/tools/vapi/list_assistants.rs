use crate::assistant::AssistantSummary;
use crate::client::VapiClient;
use crate::envelope::{keys, Envelope};
use crate::error::VapiResult;
use crate::resolver::AssistantResolver;
use crate::tools::Tool;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Lists assistants with cost estimates and phone numbers
pub struct ListAssistantsTool {
    resolver: AssistantResolver,
}

impl ListAssistantsTool {
    pub fn new(client: Arc<VapiClient>) -> Self {
        Self {
            resolver: AssistantResolver::new(client),
        }
    }

    /// One assistant-list fetch, then one phone-number fetch per assistant.
    pub async fn list_assistants(&self) -> VapiResult<Vec<AssistantSummary>> {
        let assistants = self.resolver.fetch_assistants().await?;
        debug!(target: "list_assistants", count = assistants.len(), "Fetched assistants");

        let mut summaries = Vec::with_capacity(assistants.len());
        for assistant in assistants {
            debug!(
                target: "list_assistants",
                assistant = ?assistant.get("id"),
                "Re-fetching phone numbers for assistant (one request per assistant)"
            );
            let phone_numbers = self.resolver.fetch_phone_numbers().await?;
            summaries.push(AssistantSummary::from_record(assistant, &phone_numbers)?);
        }

        Ok(summaries)
    }
}

#[async_trait]
impl Tool for ListAssistantsTool {
    fn name(&self) -> String {
        "list_assistants".to_string()
    }

    fn description(&self) -> String {
        "List all VAPI assistants with their estimated cost per minute and associated phone numbers"
            .to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: Value) -> VapiResult<Envelope> {
        let summaries = self.list_assistants().await?;
        let message = format!("Found {} assistants", summaries.len());

        Ok(Envelope::success(message).with(keys::ASSISTANTS, serde_json::to_value(summaries)?))
    }
}
