//! MCP tool handlers for the bookmark search server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::models::BookmarkRef;
use crate::services::{IndexService, SearchService};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing bookmark search and index maintenance tools.
#[derive(Clone)]
pub struct BookmarkSearchServer {
    search_service: Arc<dyn SearchService>,
    index_service: Arc<dyn IndexService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for BookmarkSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "bookmark-search".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Full-text search over the pages behind your bookmarks. Search is available once the initial index build has finished; check index_status.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchBookmarksParams {
    query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct BookmarkEventParams {
    /// The created or removed bookmark node (leaf or folder)
    node: BookmarkRef,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EmptyParams {}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl BookmarkSearchServer {
    /// Create a new bookmark search server.
    pub fn new(search_service: Arc<dyn SearchService>, index_service: Arc<dyn IndexService>) -> Self {
        Self {
            search_service,
            index_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Full-text search over bookmarked pages.
    #[tool(
        description = "Search bookmarked pages by url, title and page text. Matched words are wrapped in <strong> tags; content is a snippet around the first match. Fails while the index is still being built."
    )]
    async fn search_bookmarks(
        &self,
        params: Parameters<SearchBookmarksParams>,
    ) -> Result<CallToolResult, McpError> {
        let response = self
            .search_service
            .search(params.0.query)
            .await
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    #[tool(description = "Report whether search is ready, how many pages are indexed, and indexing counters")]
    async fn index_status(
        &self,
        _params: Parameters<EmptyParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&self.index_service.status().await)
    }

    #[tool(
        description = "Re-fetch and re-index every bookmark in the bookmark file, then rebuild the search index. Waits for the run to finish."
    )]
    async fn reindex_bookmarks(
        &self,
        _params: Parameters<EmptyParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.index_service.reindex().await.map_err(to_mcp_error)?;
        json_result(&report)
    }

    #[tool(description = "Index a newly created bookmark or every bookmark in a newly created folder")]
    async fn bookmark_created(
        &self,
        params: Parameters<BookmarkEventParams>,
    ) -> Result<CallToolResult, McpError> {
        let node = params.0.node;
        let id = node.id.clone();
        self.index_service
            .bookmark_created(node)
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({ "queued": "created", "id": id }))
    }

    #[tool(
        description = "Remove a deleted bookmark from the index. For a deleted folder, every indexed page no longer in the bookmark file is removed."
    )]
    async fn bookmark_removed(
        &self,
        params: Parameters<BookmarkEventParams>,
    ) -> Result<CallToolResult, McpError> {
        let node = params.0.node;
        let id = node.id.clone();
        self.index_service
            .bookmark_removed(node)
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({ "queued": "removed", "id": id }))
    }
}
