//! Per-minute cost estimate for an assistant.
//!
//! The estimate is a base platform rate plus one addend for the transcriber
//! provider and one for the voice provider. All prices are in USD per minute
//! of call time. Providers missing from the tables contribute nothing; that
//! is a pricing gap, not an error.
//!
//! # Usage
//!
//! ```rust
//! use vapi_mcp_core::pricing::estimate_cost_per_minute;
//!
//! assert_eq!(estimate_cost_per_minute("deepgram", "cartesia"), 0.082);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value;

/// Platform rate charged on every call minute
pub const BASE_RATE_PER_MINUTE: f64 = 0.05;

/// Transcriber addends. Keys are lowercase provider names.
static TRANSCRIBER_PRICING: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("deepgram", 0.01);
    m.insert("assembly-ai", 0.008);
    m
});

/// Voice addends. Keys are lowercase provider names.
static VOICE_PRICING: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("cartesia", 0.022);
    m
});

/// Transcriber addend, zero for unpriced providers
pub fn transcriber_rate(provider: &str) -> f64 {
    TRANSCRIBER_PRICING
        .get(provider.to_lowercase().as_str())
        .copied()
        .unwrap_or(0.0)
}

/// Voice addend, zero for unpriced providers
pub fn voice_rate(provider: &str) -> f64 {
    VOICE_PRICING
        .get(provider.to_lowercase().as_str())
        .copied()
        .unwrap_or(0.0)
}

/// Estimated USD per minute, rounded to 4 decimal places.
pub fn estimate_cost_per_minute(transcriber: &str, voice: &str) -> f64 {
    let total = BASE_RATE_PER_MINUTE + transcriber_rate(transcriber) + voice_rate(voice);
    (total * 10_000.0).round() / 10_000.0
}

/// Estimate for a remote assistant record, reading `transcriber.provider`
/// and `voice.provider`.
pub fn estimate_for_assistant(assistant: &Value) -> f64 {
    let provider = |section: &str| {
        assistant
            .get(section)
            .and_then(|s| s.get("provider"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    };
    estimate_cost_per_minute(provider("transcriber"), provider("voice"))
}
