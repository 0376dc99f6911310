//! # MCP Rest APIs
//!
//! Tool server for an assistant runtime, speaking MCP over stdio:
//! - `request`: issue an HTTP call with caller-supplied method, headers and body
//! - `save_environment_variable_or_api_doc` / `get_file` / `list_files`:
//!   keep small named text blobs (API keys, API docs) in one directory
//!
//! ## Architecture
//!
//! ```text
//!   stdin ──► codec ──► router ──► ToolDispatcher ──► ToolRegistry (schema check)
//!                                      │
//!                                      ├──► HttpExecutor ──► audit log
//!                                      └──► FileStore
//!   stdout ◄── codec ◄── reply
//! ```
//!
//! One message is handled to completion before the next is read.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod audit;
pub mod install;
pub mod mcp;
pub mod tools;
pub mod types;
pub mod validation;

// Internal utilities
pub mod observability;

use std::sync::Arc;

pub use types::{Config, Error, FatalError, Result};

/// Build the dispatcher and server described by `config`.
pub fn build_server(config: &Config) -> std::result::Result<mcp::StdioServer, FatalError> {
    let executor = tools::ReqwestExecutor::new(&config.http)
        .map_err(|e| FatalError::config(e.to_string()))?;
    let dispatcher = tools::ToolDispatcher::new(
        Arc::new(tools::ToolRegistry::builtin()),
        Arc::new(executor),
        tools::FileStore::new(config.store.base_dir.clone()),
        audit::AuditLogger::new(&config.audit),
    );
    Ok(mcp::StdioServer::new(
        Arc::new(dispatcher),
        config.transport.clone(),
    ))
}
