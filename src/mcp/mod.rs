//! MCP protocol engine

pub mod coerce;
pub mod protocol;
pub mod schema;
pub mod server;

pub use server::McpServer;
