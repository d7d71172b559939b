use super::traits::Tool;
use crate::envelope::Envelope;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A registry for managing available tools
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Arc<DashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a set of tools
    pub fn with_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Register a new tool, replacing any tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name();
        info!(target: "tool_registry", tool = %name, "Registering tool");
        self.tools.insert(name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(|t| t.clone())
    }

    /// List all registered tools, sorted by name
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let mut tools: Vec<Arc<dyn Tool>> = self.tools.iter().map(|t| t.clone()).collect();
        tools.sort_by_key(|t| t.name());
        tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Call a tool by name. Returns `None` when no such tool is registered.
    #[tracing::instrument(skip(self, arguments), fields(tool.name = %name))]
    pub async fn call(&self, name: &str, arguments: Value) -> Option<Envelope> {
        let tool = self.get(name)?;
        let start_time = Instant::now();

        debug!(target: "tool_registry", tool = %name, "Invoking tool");

        let envelope = tool.call(arguments).await;

        let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        info!(
            target: "tool_registry",
            tool = %name,
            success = envelope.is_success(),
            elapsed_ms,
            "Tool invocation finished"
        );

        Some(envelope)
    }
}
