/// MCP Server implementation
///
/// Serves the tool registry over newline-delimited JSON-RPC 2.0. Requests
/// are handled strictly one at a time: a line is read, dispatched to
/// completion and answered before the next line is read.
use super::types::*;
use crate::tools::ToolRegistry;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// MCP server exposing a [`ToolRegistry`]
pub struct McpServer {
    registry: ToolRegistry,
    server_info: ServerInfo,
    instructions: Option<String>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_info: ServerInfo {
                name: "vapi".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some("VAPI integration for making AI-powered phone calls".to_string()),
        }
    }

    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.server_info = ServerInfo {
            name: name.into(),
            version: version.into(),
        };
        self
    }

    pub fn with_instructions(mut self, instructions: Option<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on the process stdin/stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<(), McpError> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve on an arbitrary line-oriented reader/writer pair
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            target: "mcp_server",
            server = %self.server_info.name,
            tools = self.registry.len(),
            "MCP server listening"
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!(target: "mcp_server", "Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(target: "mcp_server", error = %e, "Failed to parse JSON-RPC message");
                let err = McpError::Parse(e.to_string());
                return Some(JsonRpcResponse::failure(Value::Null, err.to_rpc_error()));
            }
        };

        let id = raw.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(raw) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                let err = McpError::InvalidRequest(e.to_string());
                Some(JsonRpcResponse::failure(id, err.to_rpc_error()))
            }
        }
    }

    /// Handle one decoded request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(target: "mcp_server", method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        debug!(target: "mcp_server", method = %request.method, id = %id, "Request received");

        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!(target: "mcp_server", method = %request.method, error = %e, "Request failed");
                JsonRpcResponse::failure(id, e.to_rpc_error())
            }
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        match method {
            "initialize" => {
                let params: InitializeParams = parse_params(params)?;
                Ok(serde_json::to_value(self.initialize(params))?)
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(serde_json::to_value(self.list_tools())?),
            "tools/call" => {
                let params: CallToolParams = parse_params(params)?;
                Ok(serde_json::to_value(self.call_tool(params).await?)?)
            }
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    fn initialize(&self, params: InitializeParams) -> InitializeResult {
        if let Some(ref client) = params.client_info {
            info!(
                target: "mcp_server",
                client_name = %client.name,
                client_version = %client.version,
                "Client connected"
            );
        }

        InitializeResult {
            protocol_version: negotiate_protocol_version(params.protocol_version.as_deref())
                .to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: self.server_info.clone(),
            instructions: self.instructions.clone(),
        }
    }

    fn list_tools(&self) -> ListToolsResult {
        let tools = self
            .registry
            .list_tools()
            .iter()
            .map(|tool| McpTool {
                name: tool.name(),
                description: Some(tool.description()),
                input_schema: tool.parameters(),
            })
            .collect();

        ListToolsResult {
            tools,
            next_cursor: None,
        }
    }

    async fn call_tool(&self, params: CallToolParams) -> Result<McpToolCall, McpError> {
        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        let envelope = self
            .registry
            .call(&params.name, arguments)
            .await
            .ok_or_else(|| McpError::ToolNotFound(params.name.clone()))?;

        let text = serde_json::to_string_pretty(&envelope.to_value())?;
        Ok(McpToolCall {
            content: vec![ToolContent::Text { text }],
            is_error: Some(!envelope.is_success()),
        })
    }
}

/// Absent params are read as `{}`
fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    let value = match params {
        None | Some(Value::Null) => json!({}),
        Some(value) => value,
    };
    serde_json::from_value(value).map_err(|e| McpError::InvalidParams(e.to_string()))
}
