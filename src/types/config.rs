//! Configuration structures.
//!
//! Configuration is loaded from an optional JSON file, then overridden by
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::errors::FatalError;

/// Environment variable overriding [`StoreConfig::base_dir`].
pub const ENV_BASE_DIR: &str = "MCPRESTAPIS_BASE_DIR";
/// Environment variable overriding [`HttpConfig::timeout`] (humantime, e.g. `45s`).
pub const ENV_HTTP_TIMEOUT: &str = "MCPRESTAPIS_HTTP_TIMEOUT";
/// Environment variable overriding [`AuditConfig::log_path`].
pub const ENV_AUDIT_LOG: &str = "MCPRESTAPIS_AUDIT_LOG";

/// Global server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// File store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Outbound HTTP configuration.
    #[serde(default)]
    pub http: HttpConfig,

    /// Audit log configuration.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Stdio transport configuration.
    #[serde(default)]
    pub transport: TransportConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from `path` (if given) and apply environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, FatalError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    FatalError::config(format!("failed to read {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&raw).map_err(|e| {
                    FatalError::config(format!("failed to parse {}: {}", path.display(), e))
                })?
            }
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), FatalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = lookup(ENV_BASE_DIR) {
            self.store.base_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT) {
            self.http.timeout = humantime_serde::re::humantime::parse_duration(raw.trim())
                .map_err(|e| FatalError::config(format!("{ENV_HTTP_TIMEOUT}: {e}")))?;
        }
        if let Some(path) = lookup(ENV_AUDIT_LOG) {
            self.audit.log_path = PathBuf::from(path);
        }
        Ok(())
    }
}

/// File store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding saved files. Never supplied per call.
    pub base_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
        }
    }
}

/// `<user data dir>/ClaudeEnvironment`, falling back to the working directory
/// when the platform has no data directory.
pub fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ClaudeEnvironment")
}

/// Outbound HTTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// User-Agent header sent unless the caller supplies one.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("mcprestapis/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Audit log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Append-only log file, relative to the working directory unless absolute.
    pub log_path: PathBuf,

    /// Disable to skip audit writes entirely.
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("logs").join("requests.log"),
            enabled: true,
        }
    }
}

/// Stdio transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Maximum size of one incoming message line in bytes.
    pub max_message_bytes: usize,

    /// Write timeout in seconds per reply. A stalled reader on the other end
    /// is treated as a transport failure.
    pub write_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_message_bytes: 5 * 1024 * 1024,
            write_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
