// Vapi MCP Core Library
// Vapi voice-calling API exposed as Model Context Protocol tools

pub mod assistant;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod mcp;
pub mod normalize;
pub mod pricing;
pub mod resolver;
pub mod tools;

// Export core types
pub use assistant::{AssistantConfig, AssistantSummary, CallPayload};
pub use client::{ApiResponse, ResponseBody, VapiClient};
pub use config::VapiConfig;
pub use envelope::Envelope;
pub use error::{VapiError, VapiResult};
pub use mcp::McpServer;
pub use resolver::AssistantResolver;
pub use tools::{vapi_tools, Tool, ToolRegistry};

use std::sync::Arc;

/// Registry holding every Vapi tool, ready to be served
pub fn vapi_registry(config: VapiConfig) -> VapiResult<ToolRegistry> {
    let client = Arc::new(VapiClient::new(config)?);
    Ok(ToolRegistry::with_tools(vapi_tools(client)))
}
