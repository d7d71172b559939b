use vapi_mcp_server::{init_tracing, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(target: "vapi_server", error = %e, "Failed to start MCP server");
        return Err(e.into());
    }

    Ok(())
}
