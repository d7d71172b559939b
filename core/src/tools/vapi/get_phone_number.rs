use crate::client::VapiClient;
use crate::envelope::{keys, Envelope};
use crate::error::{VapiError, VapiResult};
use crate::normalize;
use crate::resolver::PHONE_NUMBERS_PATH;
use crate::tools::{parse_arguments, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GetPhoneNumberArgs {
    phone_number_id: String,
}

/// Fetches a single phone-number record
pub struct GetPhoneNumberTool {
    client: Arc<VapiClient>,
}

impl GetPhoneNumberTool {
    pub fn new(client: Arc<VapiClient>) -> Self {
        Self { client }
    }

    pub async fn get_phone_number(&self, phone_number_id: &str) -> VapiResult<Value> {
        if phone_number_id.trim().is_empty() {
            return Err(VapiError::InvalidArguments(
                "'phone_number_id' must not be empty".to_string(),
            ));
        }

        debug!(target: "get_phone_number", id = %phone_number_id, "Fetching phone number");

        let response = self
            .client
            .get_record(PHONE_NUMBERS_PATH, phone_number_id)
            .await?;
        normalize::expect_success(response)
    }
}

#[async_trait]
impl Tool for GetPhoneNumberTool {
    fn name(&self) -> String {
        "get_phone_number".to_string()
    }

    fn description(&self) -> String {
        "Get details of a VAPI phone number by its ID".to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "phone_number_id": {
                    "type": "string",
                    "description": "The VAPI phone number ID"
                }
            },
            "required": ["phone_number_id"]
        })
    }

    async fn execute(&self, arguments: Value) -> VapiResult<Envelope> {
        let args: GetPhoneNumberArgs = parse_arguments(arguments)?;
        let record = self.get_phone_number(&args.phone_number_id).await?;

        Ok(Envelope::success("Phone number retrieved").with(keys::PHONE_NUMBER, record))
    }
}
