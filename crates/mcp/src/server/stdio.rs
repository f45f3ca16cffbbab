use anyhow::Result;
use rmcp::ServiceExt;
use tracing::info;

use crate::server::core::PaylineMcpCore;

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio(core: PaylineMcpCore) -> Result<()> {
    info!(tools = core.registry().descriptors().len(), "serving MCP over stdio");
    let service = core.serve(rmcp::transport::stdio()).await?;
    let reason = service.waiting().await?;
    info!(?reason, "stdio session ended");
    Ok(())
}
