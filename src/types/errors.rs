//! Application error types.
//!
//! Two channels, kept deliberately apart:
//! - [`Error`] covers everything that can go wrong while serving a single
//!   tool call. The dispatcher turns it into tool-level error text and the
//!   server keeps running.
//! - [`FatalError`] covers startup, transport and installer failures. The
//!   binary logs it and exits with a non-zero status.

use thiserror::Error;

use crate::mcp::protocol::{INTERNAL_ERROR, INVALID_PARAMS};

/// Per-call result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Per-call error enum.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed tool arguments. The message names every offending field.
    #[error("invalid arguments: {0}")]
    Validation(String),

    /// Tool name not present in the registry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Outbound HTTP call failed or returned a non-success status.
    #[error("{}", format_request_error(.status, .message))]
    Request {
        status: Option<u16>,
        message: String,
    },

    /// Stored file does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_request_error(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("There was an error making the request: HTTP error! status: {code}: {message}"),
        None => format!("There was an error making the request: {message}"),
    }
}

impl Error {
    /// JSON-RPC error code used when the error escapes a tool call and has
    /// to be reported at the protocol level.
    pub fn rpc_code(&self) -> i64 {
        match self {
            Error::Validation(_) | Error::UnknownTool(_) => INVALID_PARAMS,
            Error::Request { .. }
            | Error::NotFound(_)
            | Error::Serialization(_)
            | Error::Internal(_)
            | Error::Io(_) => INTERNAL_ERROR,
        }
    }

    /// Short machine-readable error kind, used in diagnostic logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "INVALID_ARGUMENT",
            Error::UnknownTool(_) => "UNKNOWN_TOOL",
            Error::Request { .. } => "REQUEST_FAILED",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Serialization(_) => "SERIALIZATION",
            Error::Internal(_) => "INTERNAL",
            Error::Io(_) => "IO",
        }
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn request(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Errors that terminate the process.
#[derive(Error, Debug)]
pub enum FatalError {
    /// The stdio transport could not be set up or broke mid-stream.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Installer invoked on a platform without a known host config location.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Host config file could not be updated.
    #[error("install error: {0}")]
    Install(String),
}

impl FatalError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn install(msg: impl Into<String>) -> Self {
        Self::Install(msg.into())
    }
}
