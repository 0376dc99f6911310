//! Tool dispatcher — resolves a tool call, validates it and runs its handler.

use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};

use super::files::FileStore;
use super::http::{HttpExecutor, HttpRequest};
use super::registry::{ToolRegistry, ValidatedRequest};
use crate::audit::{AuditLogger, AuditTag};
use crate::mcp::protocol::ToolResult;
use crate::types::{Error, Result};

/// Runs tool calls against the registry. Stateless between calls.
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    executor: Arc<dyn HttpExecutor>,
    store: FileStore,
    audit: AuditLogger,
}

impl fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDispatcher")
            .field("tools", &self.registry.entries().count())
            .field("store", &self.store)
            .field("audit", &self.audit)
            .finish_non_exhaustive()
    }
}

impl ToolDispatcher {
    pub fn new(
        registry: Arc<ToolRegistry>,
        executor: Arc<dyn HttpExecutor>,
        store: FileStore,
        audit: AuditLogger,
    ) -> Self {
        Self {
            registry,
            executor,
            store,
            audit,
        }
    }

    /// Descriptors for `tools/list`.
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry.entries().map(|e| e.to_descriptor()).collect()
    }

    /// Run one tool call and return its success text.
    pub async fn call(&self, name: &str, args: &Value) -> Result<String> {
        let tool = self.registry.resolve(name)?;
        let empty = Value::Object(serde_json::Map::new());
        let args = if args.is_null() { &empty } else { args };

        match ValidatedRequest::parse(tool.kind, &tool.entry, args)? {
            ValidatedRequest::Request(request) => self.run_request(request).await,
            ValidatedRequest::SaveFile {
                file_name,
                file_content,
            } => {
                self.store.save(&file_name, &file_content).await?;
                Ok(format!("Saved file to {}", file_name))
            }
            ValidatedRequest::GetFile { file_name } => self.store.get(&file_name).await,
            ValidatedRequest::ListFiles => Ok(self.store.list().await?.join("\n")),
        }
    }

    /// Run one tool call and fold any failure into an error result.
    pub async fn call_tool(&self, name: &str, args: &Value) -> ToolResult {
        match self.call(name, args).await {
            Ok(text) => ToolResult::text(text),
            Err(e) => {
                tracing::warn!(tool = name, kind = e.kind(), "tool call failed: {}", e);
                ToolResult::error(e.to_string())
            }
        }
    }

    async fn run_request(&self, request: HttpRequest) -> Result<String> {
        self.audit.append(AuditTag::Request, &request).await;

        let result = self.executor.execute(request).await;
        match &result {
            Ok(outcome) => self.audit.append(AuditTag::Response, outcome).await,
            Err(e) => {
                let status = match e {
                    Error::Request { status, .. } => *status,
                    _ => None,
                };
                self.audit
                    .append(
                        AuditTag::Response,
                        json!({ "error": e.to_string(), "status": status }),
                    )
                    .await
            }
        }

        let outcome = result?;
        Ok(json!({ "response": outcome }).to_string())
    }
}
