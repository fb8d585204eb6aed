//! bookshelf-mcp — personal book library with durable JSON storage.
//!
//! domain (Library, BookRecord) / application (LibraryService) /
//! infra (JSON file store) / interface (MCP server, text rendering)

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod interface;
