//! MCP JSON-RPC message types.
//!
//! Only what the server speaks: `initialize`, `ping`, `tools/list`,
//! `tools/call` and notifications.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision advertised in the `initialize` reply.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// Server name advertised in the `initialize` reply.
pub const SERVER_NAME: &str = "requests";
/// Server version advertised in the `initialize` reply.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// -----------------------------------------------------------------------------
// JSON-RPC error codes
// -----------------------------------------------------------------------------

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// -----------------------------------------------------------------------------
// JSON-RPC base types
// -----------------------------------------------------------------------------

/// Incoming JSON-RPC message. A missing `id` marks a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tool call results
// -----------------------------------------------------------------------------

/// Content block in a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Result of `tools/call`. Tool failures are reported here with
/// `isError: true` rather than as JSON-RPC errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolResultContent>,
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(msg: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".to_string(),
                text: msg.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(msg)
        }
    }

    /// Text of the first content block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| c.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_id_is_notification() {
        let req: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
                .unwrap();
        assert!(req.is_notification());
        assert_eq!(req.params, Value::Null);
    }

    #[test]
    fn test_error_response_omits_result() {
        let resp = JsonRpcResponse::error(json!(7), METHOD_NOT_FOUND, "nope");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["error"]["code"], -32601);
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_tool_result_is_error_flag_serialization() {
        let ok = serde_json::to_value(ToolResult::text("fine")).unwrap();
        assert!(ok.get("isError").is_none());
        assert_eq!(ok["content"][0]["type"], "text");

        let err = serde_json::to_value(ToolResult::error("broken")).unwrap();
        assert_eq!(err["isError"], true);
        assert_eq!(err["content"][0]["text"], "broken");
    }
}
