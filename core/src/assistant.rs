/// Call payloads and assistant records
///
/// `CallPayload` is the body of `POST /call`. It carries either an inline
/// assistant built for this call or a reference to an existing assistant.
/// The two forms deliver the task differently: inline assistants get it in
/// their system prompt, referenced assistants get it as a user turn.
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{VapiError, VapiResult};
use crate::pricing;

/// Hard cap on call length for inline assistants
pub const MAX_DURATION_SECONDS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub provider: String,
    pub voice_id: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriberConfig {
    pub provider: String,
    pub model: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionEndpointingPlan {
    pub on_punctuation_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSpeakingPlan {
    pub wait_seconds: f64,
    pub transcription_endpointing_plan: TranscriptionEndpointingPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopSpeakingPlan {
    pub backoff_seconds: f64,
}

/// Full assistant definition sent inline with a call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantConfig {
    pub name: String,
    pub model: ModelConfig,
    pub voice: VoiceConfig,
    pub transcriber: TranscriberConfig,
    pub end_call_message: String,
    pub client_messages: Vec<String>,
    pub server_messages: Vec<String>,
    pub max_duration_seconds: u32,
    pub background_denoising_enabled: bool,
    pub start_speaking_plan: StartSpeakingPlan,
    pub stop_speaking_plan: StopSpeakingPlan,
}

impl AssistantConfig {
    /// Ad-hoc assistant whose system prompt embeds `task` verbatim
    pub fn inline(task: &str) -> Self {
        Self {
            name: "Assistant".to_string(),
            model: ModelConfig {
                provider: "openai".to_string(),
                model: "gpt-4".to_string(),
                messages: vec![ChatMessage::system(system_prompt(task))],
                temperature: 0.7,
            },
            voice: VoiceConfig {
                provider: "cartesia".to_string(),
                voice_id: "c45bc5ec-dc68-4feb-8829-6e6b2748095d".to_string(),
                model: "sonic-english".to_string(),
            },
            transcriber: TranscriberConfig {
                provider: "deepgram".to_string(),
                model: "nova-2".to_string(),
                language: "en".to_string(),
            },
            end_call_message: "Thanks, take care!".to_string(),
            client_messages: to_strings(&[
                "hang",
                "transcript",
                "function-call",
                "conversation-update",
                "speech-update",
                "metadata",
            ]),
            server_messages: to_strings(&[
                "end-of-call-report",
                "status-update",
                "hang",
                "function-call",
            ]),
            max_duration_seconds: MAX_DURATION_SECONDS,
            background_denoising_enabled: false,
            start_speaking_plan: StartSpeakingPlan {
                wait_seconds: 1.2,
                transcription_endpointing_plan: TranscriptionEndpointingPlan {
                    on_punctuation_seconds: 0.4,
                },
            },
            stop_speaking_plan: StopSpeakingPlan {
                backoff_seconds: 2.0,
            },
        }
    }
}

pub fn system_prompt(task: &str) -> String {
    format!(
        "You are an AI assistant making calls on behalf of a client. Your task is: {}. \
         Be friendly, professional, and natural during the call.",
        task
    )
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOverrides {
    pub messages: Vec<ChatMessage>,
}

/// Per-call overrides applied on top of a stored assistant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantOverrides {
    pub model: ModelOverrides,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub number: String,
}

/// Body of `POST /call`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant: Option<AssistantConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_overrides: Option<AssistantOverrides>,
    pub phone_number_id: String,
    pub customer: Customer,
}

impl CallPayload {
    /// Call driven by an inline assistant
    pub fn inline(task: &str, customer_number: &str, phone_number_id: &str) -> Self {
        Self {
            assistant: Some(AssistantConfig::inline(task)),
            assistant_id: None,
            assistant_overrides: None,
            phone_number_id: phone_number_id.to_string(),
            customer: Customer {
                number: customer_number.to_string(),
            },
        }
    }

    /// Call driven by a stored assistant; the task arrives as a user message
    pub fn for_assistant(
        assistant_id: &str,
        task: &str,
        customer_number: &str,
        phone_number_id: &str,
    ) -> Self {
        Self {
            assistant: None,
            assistant_id: Some(assistant_id.to_string()),
            assistant_overrides: Some(AssistantOverrides {
                model: ModelOverrides {
                    messages: vec![ChatMessage::user(task)],
                },
            }),
            phone_number_id: phone_number_id.to_string(),
            customer: Customer {
                number: customer_number.to_string(),
            },
        }
    }
}

pub const COST_FIELD: &str = "estimated_cost_per_minute";
pub const PHONE_NUMBERS_FIELD: &str = "phone_numbers";

/// Remote assistant record plus its cost estimate and phone numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantSummary {
    #[serde(flatten)]
    pub record: Map<String, Value>,
    pub estimated_cost_per_minute: f64,
    pub phone_numbers: Vec<Value>,
}

impl AssistantSummary {
    /// Build a summary, keeping only the numbers owned by this assistant.
    pub fn from_record(record: Value, phone_numbers: &[Value]) -> VapiResult<Self> {
        let estimated_cost_per_minute = pricing::estimate_for_assistant(&record);

        let mut record = match record {
            Value::Object(map) => map,
            other => {
                return Err(VapiError::Unexpected(format!(
                    "Assistant record is not an object: {}",
                    other
                )))
            }
        };
        record.remove(COST_FIELD);
        record.remove(PHONE_NUMBERS_FIELD);

        let phone_numbers = match record.get("id").and_then(Value::as_str) {
            Some(id) => owned_by(id, phone_numbers),
            None => Vec::new(),
        };

        Ok(Self {
            record,
            estimated_cost_per_minute,
            phone_numbers,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.record.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.record.get("name").and_then(Value::as_str)
    }
}

/// Phone numbers whose `assistantId` equals `assistant_id`
pub fn owned_by(assistant_id: &str, phone_numbers: &[Value]) -> Vec<Value> {
    phone_numbers
        .iter()
        .filter(|n| n.get("assistantId").and_then(Value::as_str) == Some(assistant_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_payload_shape() {
        let body = serde_json::to_value(CallPayload::inline(
            "remind about appointment",
            "+15551234567",
            "pn_1",
        ))
        .unwrap();

        assert!(body.get("assistantId").is_none());
        assert!(body.get("assistantOverrides").is_none());
        assert_eq!(body["phoneNumberId"], "pn_1");
        assert_eq!(body["customer"]["number"], "+15551234567");

        let assistant = &body["assistant"];
        assert!(assistant.get("assistantId").is_none());
        assert_eq!(assistant["maxDurationSeconds"], 120);
        assert_eq!(assistant["model"]["messages"][0]["role"], "system");
        assert!(assistant["model"]["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("remind about appointment"));
        assert_eq!(assistant["voice"]["voiceId"], "c45bc5ec-dc68-4feb-8829-6e6b2748095d");
        assert_eq!(
            assistant["startSpeakingPlan"]["transcriptionEndpointingPlan"]["onPunctuationSeconds"],
            0.4
        );
        assert_eq!(assistant["backgroundDenoisingEnabled"], false);
    }

    #[test]
    fn test_reference_payload_sends_task_as_user_turn() {
        let body = serde_json::to_value(CallPayload::for_assistant(
            "asst_9",
            "collect the invoice number",
            "+15551234567",
            "pn_1",
        ))
        .unwrap();

        assert!(body.get("assistant").is_none());
        assert_eq!(body["assistantId"], "asst_9");
        assert_eq!(
            body["assistantOverrides"]["model"]["messages"],
            json!([{"role": "user", "content": "collect the invoice number"}])
        );
    }

    #[test]
    fn test_summary_filters_phone_numbers() {
        let numbers = vec![
            json!({"id": "pn_1", "number": "+15550000001", "assistantId": "asst_1"}),
            json!({"id": "pn_2", "number": "+15550000002", "assistantId": "asst_2"}),
            json!({"id": "pn_3", "number": "+15550000003"}),
        ];
        let summary = AssistantSummary::from_record(
            json!({
                "id": "asst_1",
                "name": "Billing Bot",
                "transcriber": {"provider": "deepgram"},
                "voice": {"provider": "cartesia"}
            }),
            &numbers,
        )
        .unwrap();

        assert_eq!(summary.id(), Some("asst_1"));
        assert_eq!(summary.name(), Some("Billing Bot"));
        assert_eq!(summary.phone_numbers.len(), 1);
        assert_eq!(summary.phone_numbers[0]["id"], "pn_1");

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["estimated_cost_per_minute"], 0.082);
        assert_eq!(value["name"], "Billing Bot");
    }

    #[test]
    fn test_summary_rejects_non_object() {
        assert!(AssistantSummary::from_record(json!("asst_1"), &[]).is_err());
    }
}
