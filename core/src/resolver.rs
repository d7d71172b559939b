/// Assistant lookup by human-readable name
use crate::assistant::AssistantSummary;
use crate::client::VapiClient;
use crate::error::{VapiError, VapiResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const ASSISTANTS_PATH: &str = "assistant";
pub const PHONE_NUMBERS_PATH: &str = "phone-number";

/// Fetches assistants and phone numbers and matches assistants by name.
///
/// Nothing is cached: every lookup re-reads the remote collections.
#[derive(Debug, Clone)]
pub struct AssistantResolver {
    client: Arc<VapiClient>,
}

impl AssistantResolver {
    pub fn new(client: Arc<VapiClient>) -> Self {
        Self { client }
    }

    /// `GET /assistant`, first page only
    pub async fn fetch_assistants(&self) -> VapiResult<Vec<Value>> {
        self.client.get_list(ASSISTANTS_PATH).await
    }

    /// `GET /phone-number`, first page only
    pub async fn fetch_phone_numbers(&self) -> VapiResult<Vec<Value>> {
        self.client.get_list(PHONE_NUMBERS_PATH).await
    }

    /// Resolve `name` to the first assistant whose `name` matches exactly.
    ///
    /// Issues one assistant-list fetch, then one phone-number fetch for the
    /// match only.
    pub async fn resolve(&self, name: &str) -> VapiResult<AssistantSummary> {
        debug!(target: "assistant_resolver", name = %name, "Resolving assistant");

        let assistants = self.fetch_assistants().await?;
        let record = find_by_name(&assistants, name)
            .cloned()
            .ok_or_else(|| VapiError::NotFound(name.to_string()))?;

        let phone_numbers = self.fetch_phone_numbers().await?;
        let summary = AssistantSummary::from_record(record, &phone_numbers)?;

        debug!(
            target: "assistant_resolver",
            name = %name,
            id = summary.id().unwrap_or_default(),
            phone_numbers = summary.phone_numbers.len(),
            "Assistant resolved"
        );

        Ok(summary)
    }
}

/// First assistant whose `name` equals `name` (case-sensitive)
pub fn find_by_name<'a>(assistants: &'a [Value], name: &str) -> Option<&'a Value> {
    assistants
        .iter()
        .find(|a| a.get("name").and_then(Value::as_str) == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_by_name_is_exact_and_first_wins() {
        let assistants = vec![
            json!({"id": "a1", "name": "billing bot"}),
            json!({"id": "a2", "name": "Billing Bot"}),
            json!({"id": "a3", "name": "Billing Bot"}),
            json!({"id": "a4"}),
        ];

        assert_eq!(find_by_name(&assistants, "Billing Bot").unwrap()["id"], "a2");
        assert_eq!(find_by_name(&assistants, "billing bot").unwrap()["id"], "a1");
        assert!(find_by_name(&assistants, "Billing").is_none());
        assert!(find_by_name(&[], "Billing Bot").is_none());
    }
}
