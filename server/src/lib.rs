// Vapi MCP Server
// Process bootstrap: environment, logging, tool registration, stdio transport

use thiserror::Error;
use tracing::info;
use vapi_mcp_core::mcp::McpError;
use vapi_mcp_core::{vapi_registry, McpServer, VapiConfig, VapiError};

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,vapi_mcp_core=info,vapi_mcp_server=info";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Startup failed: {0}")]
    Startup(#[from] VapiError),

    #[error("MCP transport failed: {0}")]
    Transport(#[from] McpError),
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// Install the global tracing subscriber.
///
/// Logs go to stderr; stdout is reserved for protocol frames.
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Load `.env` (when present) and read the Vapi configuration
pub fn load_config() -> Result<VapiConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        info!(target: "vapi_server", path = %path.display(), "Loaded environment file");
    }
    Ok(VapiConfig::from_env()?)
}

/// Build the MCP server for a configuration
pub fn build_server(config: VapiConfig) -> Result<McpServer> {
    info!(
        target: "vapi_server",
        phone_number_id = %config.phone_number_id,
        base_url = %config.base_url,
        "VAPI tool initialized"
    );

    let registry = vapi_registry(config)?;
    Ok(McpServer::new(registry).with_server_info("vapi", env!("CARGO_PKG_VERSION")))
}

/// Run the server on stdio until the client disconnects
pub async fn run() -> Result<()> {
    let config = load_config()?;
    let server = build_server(config)?;

    info!(target: "vapi_server", "Starting VAPI MCP server...");
    server.serve_stdio().await?;
    Ok(())
}
