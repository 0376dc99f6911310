//! Core types for the server.
//!
//! - **Errors**: per-call and fatal error enums with thiserror derives
//! - **Config**: configuration structures for the store, HTTP client, audit
//!   log, transport and observability

mod config;
mod errors;

pub use config::{
    default_base_dir, AuditConfig, Config, HttpConfig, ObservabilityConfig, StoreConfig,
    TransportConfig, ENV_AUDIT_LOG, ENV_BASE_DIR, ENV_HTTP_TIMEOUT,
};
pub use errors::{Error, FatalError, Result};
