//! Stdio MCP server — read loop and reply writer.
//!
//! One message is read, handled and answered before the next is read, so
//! replies always leave in request order.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio_util::sync::CancellationToken;

use crate::mcp::codec::{read_message, write_message, Frame};
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, PARSE_ERROR};
use crate::mcp::router::route_request;
use crate::tools::ToolDispatcher;
use crate::types::TransportConfig;

/// MCP server wrapping the tool dispatcher.
#[derive(Debug)]
pub struct StdioServer {
    dispatcher: Arc<ToolDispatcher>,
    cancel: CancellationToken,
    config: TransportConfig,
}

impl StdioServer {
    pub fn new(dispatcher: Arc<ToolDispatcher>, config: TransportConfig) -> Self {
        Self {
            dispatcher,
            cancel: CancellationToken::new(),
            config,
        }
    }

    /// Serve on the process's stdin/stdout until EOF, shutdown or a
    /// transport failure.
    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        tracing::info!("MCP Rest APIs Server running on stdio");
        self.serve(stdin, stdout).await
    }

    /// Serve on an arbitrary line-oriented stream pair.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let write_timeout = Duration::from_secs(self.config.write_timeout_secs);

        loop {
            let frame = tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("MCP server shutting down");
                    break;
                }
                frame = read_message(&mut reader, self.config.max_message_bytes) => frame?,
            };
            let response = match frame {
                Some(Frame::Line(line)) => self.handle_line(&line).await,
                Some(Frame::InvalidUtf8(e)) => {
                    tracing::warn!("message is not valid UTF-8: {}", e);
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
                None => {
                    tracing::info!("stdin closed, MCP server stopping");
                    break;
                }
            };

            if let Some(response) = response {
                let encoded = serde_json::to_string(&response).map_err(|e| {
                    tracing::error!("JSON encoding failed: {}", e);
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
                })?;
                timed_write(&mut writer, &encoded, write_timeout).await?;
            }
        }
        Ok(())
    }

    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("unparsable message: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ));
            }
        };

        route_request(&self.dispatcher, request).await
    }

    /// Request graceful shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Token that stops the server when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Write a reply with a timeout. A stalled peer is a transport failure.
async fn timed_write<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &str,
    timeout: Duration,
) -> std::io::Result<()> {
    tokio::time::timeout(timeout, write_message(writer, message))
        .await
        .map_err(|_| {
            tracing::warn!("Write timeout ({}s), stopping", timeout.as_secs());
            std::io::Error::new(std::io::ErrorKind::TimedOut, "write timeout")
        })?
}
