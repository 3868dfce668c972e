//! toolmcp - Model Context Protocol tool server
//!
//! A line-delimited JSON-RPC engine that exposes a registry of named tools
//! (calculator, text, time, user directory, crypto, issue log) to a single
//! MCP client over stdio.

pub mod config;
pub mod mcp;
pub mod tools;
pub mod types;

pub use config::ConfigLoader;
pub use mcp::McpServer;
pub use tools::{ToolProvider, ToolRegistry};
pub use types::ToolError;
