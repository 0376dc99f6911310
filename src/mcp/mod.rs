//! MCP stdio transport layer.
//!
//! Newline-delimited JSON-RPC 2.0 over the process's stdin/stdout.

pub mod codec;
pub mod protocol;
pub mod router;
pub mod server;

pub use server::StdioServer;
