//! MCP Server for bookshelf-mcp
//!
//! MCP Protocol (stdio) <-> application::LibraryService
//!
//! 5 tools: add_book, remove_book, search_books, list_books, library_stats

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::error::AppError;
use crate::application::service::LibraryService;
use crate::domain::error::DomainError;
use crate::domain::model::record::BookRecord;
use crate::infra::json_store::JsonLibraryRepository;

use super::render::{format_listing, format_stats};

// =============================================================================
// Public entry point
// =============================================================================

/// MCP Serverを起動する。library_pathは蔵書JSONファイル。
pub async fn run(library_path: PathBuf) -> anyhow::Result<()> {
    info!(path = ?library_path, "serving library over stdio");
    let server = LibraryMcpServer::new(library_path);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

/// リクエストはタスクごとに並行して届くため、Serviceは全リクエストで共有する。
#[derive(Clone)]
struct LibraryMcpServer {
    service: Arc<LibraryService<JsonLibraryRepository>>,
    tool_router: ToolRouter<Self>,
}

impl LibraryMcpServer {
    fn new(library_path: PathBuf) -> Self {
        Self {
            service: Arc::new(LibraryService::new(JsonLibraryRepository::new(
                library_path,
            ))),
            tool_router: Self::tool_router(),
        }
    }

    fn service(&self) -> &LibraryService<JsonLibraryRepository> {
        &self.service
    }

    fn to_mcp_error(e: AppError) -> McpError {
        match e {
            AppError::Domain(DomainError::InvalidField(_)) => {
                McpError::invalid_params(format!("{e}"), None)
            }
            other => McpError::internal_error(format!("{other}"), None),
        }
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for LibraryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bookshelf-mcp".to_string(),
                title: Some("Bookshelf MCP — Personal Library Manager".to_string()),
                description: Some(
                    "Personal book list stored in a single JSON file. \
                     Add, remove, search, list, and summarize books."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Manage a personal library of books.\n\
                 \n\
                 Every change is saved to disk immediately. Titles identify books for removal; \
                 removing a title deletes every book with exactly that title.\n\
                 \n\
                 Tools: `add_book`, `remove_book`, `search_books`, `list_books`, `library_stats`."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpAddBookRequest {
    #[schemars(description = "Book title (used to identify the book for removal)")]
    pub title: String,
    #[schemars(description = "Author name")]
    pub author: String,
    #[schemars(description = "Publication year (0 or later)")]
    pub year: u32,
    #[schemars(description = "Genre")]
    pub genre: String,
    #[schemars(description = "Whether the book has been read (default: false)")]
    #[serde(default)]
    pub read: bool,
}

impl From<McpAddBookRequest> for BookRecord {
    fn from(req: McpAddBookRequest) -> Self {
        BookRecord::new(req.title, req.author, req.year, req.genre, req.read)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpRemoveBookRequest {
    #[schemars(description = "Exact title (case-sensitive). All books with this title are removed.")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchRequest {
    #[schemars(description = "Field to search: 'title' (default) or 'author'")]
    pub field: Option<String>,
    #[schemars(description = "Case-insensitive substring to look for. Empty matches every book.")]
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpEmptyRequest {}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl LibraryMcpServer {
    #[tool(
        name = "add_book",
        description = "Add a book to the end of the library and save it.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn add_book(
        &self,
        Parameters(req): Parameters<McpAddBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let library = self
            .service()
            .add_book(req.into())
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Book added successfully! ({} books)",
            library.len()
        ))]))
    }

    #[tool(
        name = "remove_book",
        description = "Remove every book whose title matches exactly (case-sensitive). Use `list_books` to see titles.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn remove_book(
        &self,
        Parameters(req): Parameters<McpRemoveBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let removed = self
            .service()
            .remove_book(&req.title)
            .map_err(Self::to_mcp_error)?;

        let text = match removed {
            0 => format!("No book titled '{}' found. Nothing removed.", req.title),
            1 => format!("'{}' removed successfully!", req.title),
            n => format!("'{}' removed successfully! ({} copies)", req.title, n),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "search_books",
        description = "Search books by title or author (case-insensitive substring). Results keep library order.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn search_books(
        &self,
        Parameters(req): Parameters<McpSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let field = req.field.as_deref().unwrap_or("title");
        let hits = self
            .service()
            .search_books(field, &req.query)
            .map_err(Self::to_mcp_error)?;

        if hits.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "No matching books found!",
            )]));
        }
        Ok(CallToolResult::success(vec![Content::text(format_listing(
            &hits,
        ))]))
    }

    #[tool(
        name = "list_books",
        description = "Show all books in stored order, numbered from 1.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn list_books(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpEmptyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let library = self.service().list_books().map_err(Self::to_mcp_error)?;

        if library.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "Your library is empty!",
            )]));
        }
        let output = format!(
            "# Your Library ({} books)\n\n{}",
            library.len(),
            format_listing(library.list_all())
        );
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(
        name = "library_stats",
        description = "Show total books, books read, and percentage read.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn library_stats(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpEmptyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let stats = self.service().statistics().map_err(Self::to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(format_stats(
            &stats,
        ))]))
    }
}

// =============================================================================
// Tests
// =============================================================================
