//! MCP server for bookmark search.
//!
//! Exposes search and index maintenance to MCP clients over stdio.

pub mod handlers;

pub use handlers::BookmarkSearchServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server with stdio transport until the client disconnects.
pub async fn run_server(server: BookmarkSearchServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
