/// Model Context Protocol (MCP) server
///
/// Exposes the registered tools to an MCP client over stdio.
///
/// MCP Protocol Spec: https://spec.modelcontextprotocol.io/specification/
///
/// Architecture:
/// - `server`: line-delimited JSON-RPC loop over any reader/writer pair
/// - `types`: MCP protocol types (JSON-RPC 2.0 based)
pub mod server;
pub mod types;

pub use server::McpServer;
pub use types::{
    McpError, McpTool, McpToolCall, ToolContent, DEFAULT_PROTOCOL_VERSION,
    SUPPORTED_PROTOCOL_VERSIONS,
};
