//! Observability utilities.
//!
//! stdout carries the MCP protocol, so diagnostics always go to stderr.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::types::ObservabilityConfig;

/// Environment variable switching log output to JSON.
pub const ENV_LOG_FORMAT: &str = "MCPRESTAPIS_LOG_FORMAT";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Initialize tracing subscriber once for the process.
///
/// Log format defaults to `config.json_logs` and can be switched to JSON via
/// `MCPRESTAPIS_LOG_FORMAT=json`. Filter defaults to `config.log_level` if
/// `RUST_LOG` is unset.
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let json = std::env::var(ENV_LOG_FORMAT)
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(config.json_logs);

        let result = if json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}
