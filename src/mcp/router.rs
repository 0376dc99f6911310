//! Top-level MCP router — routes by JSON-RPC method, delegates tool calls to
//! the dispatcher.

use serde_json::{json, Value};

use crate::mcp::protocol::{
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PROTOCOL_VERSION,
    SERVER_NAME, SERVER_VERSION,
};
use crate::tools::ToolDispatcher;
use crate::types::{Error, Result};

/// Route one JSON-RPC message. Notifications yield `None`.
pub async fn route_request(
    dispatcher: &ToolDispatcher,
    request: JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    let Some(id) = request.id.clone() else {
        tracing::debug!(method = %request.method, "notification received");
        return None;
    };

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, initialize_result()),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": dispatcher.list_tools() })),
        "tools/call" => match tools_call(dispatcher, &request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, e.rpc_code(), e.to_string()),
        },
        other => JsonRpcResponse::error(
            id,
            METHOD_NOT_FOUND,
            format!("Unknown method: {}", other),
        ),
    };
    Some(response)
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

async fn tools_call(dispatcher: &ToolDispatcher, params: &Value) -> Result<Value> {
    let name = str_field(params, "name")?;
    let args = params.get("arguments").cloned().unwrap_or(Value::Null);

    tracing::info!(tool = %name, "tool call");
    let result = dispatcher.call_tool(&name, &args).await;
    Ok(serde_json::to_value(result)?)
}

/// Required string field of a params object.
pub fn str_field(body: &Value, key: &str) -> Result<String> {
    body.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::validation(format!("Missing required field: {}", key)))
}
