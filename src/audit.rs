//! Append-only audit log of request tool traffic.
//!
//! Line format:
//! ```text
//! 2024-12-11T09:30:00.123Z | request: {"type":"GET","url":"...","headers":{}}
//! ```
//! Writes are best-effort. A failure is reported through `tracing` and never
//! reaches the caller.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::types::AuditConfig;

/// Which side of a request/response cycle an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditTag {
    Request,
    Response,
}

impl fmt::Display for AuditTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditTag::Request => f.write_str("request"),
            AuditTag::Response => f.write_str("response"),
        }
    }
}

/// One audit log line.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub tag: AuditTag,
    pub payload: Value,
}

impl AuditEntry {
    pub fn new(tag: AuditTag, payload: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            tag,
            payload,
        }
    }

    /// Render the entry as one log line, including the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{} | {}: {}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.tag,
            self.payload
        )
    }
}

#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
    enabled: bool,
}

impl AuditLogger {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            log_path: config.log_path.clone(),
            enabled: config.enabled,
        }
    }

    /// Logger that drops every entry.
    pub fn disabled() -> Self {
        Self {
            log_path: PathBuf::new(),
            enabled: false,
        }
    }

    /// Append one entry. Never fails.
    pub async fn append(&self, tag: AuditTag, payload: impl Serialize) {
        if !self.enabled {
            return;
        }
        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(%tag, "audit payload not serializable: {}", e);
                return;
            }
        };
        if let Err(e) = self.write_entry(&AuditEntry::new(tag, payload)).await {
            tracing::warn!(path = %self.log_path.display(), "error writing to audit log: {}", e);
        }
    }

    async fn write_entry(&self, entry: &AuditEntry) -> std::io::Result<()> {
        if let Some(parent) = self.log_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await?;
        file.write_all(entry.to_line().as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
