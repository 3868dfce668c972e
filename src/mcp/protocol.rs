//! JSON-RPC 2.0 envelopes and the MCP payloads this server speaks

use crate::mcp::schema::InputSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Inbound request. Every member is optional so that a well-formed object
/// missing `id` or `method` can still be answered with its id echoed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(jsonrpc: impl Into<String>, id: Value, result: Value) -> Self {
        Self {
            jsonrpc: jsonrpc.into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(jsonrpc: impl Into<String>, id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: jsonrpc.into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListToolsResult {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: Some(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_members_are_optional() {
        let request: JsonRpcRequest = serde_json::from_value(json!({"method": "tools/list"})).unwrap();
        assert!(request.jsonrpc.is_none());
        assert!(request.id.is_none());
        assert_eq!(request.method.as_deref(), Some("tools/list"));
    }

    #[test]
    fn test_request_rejects_non_string_method() {
        let request = serde_json::from_value::<JsonRpcRequest>(json!({"method": 7}));
        assert!(request.is_err());
    }

    #[test]
    fn test_error_response_shape() {
        let response = JsonRpcResponse::failure(
            JSONRPC_VERSION,
            Value::Null,
            JsonRpcError::new(PARSE_ERROR, "Parse error: bad"),
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32700, "message": "Parse error: bad"}})
        );
    }

    #[test]
    fn test_call_tool_result_shapes() {
        assert_eq!(
            serde_json::to_value(CallToolResult::text("5")).unwrap(),
            json!({"content": [{"type": "text", "text": "5"}]})
        );
        assert_eq!(
            serde_json::to_value(CallToolResult::error("boom")).unwrap(),
            json!({"content": [{"type": "text", "text": "boom"}], "isError": true})
        );
    }

    #[test]
    fn test_call_tool_params_null_arguments() {
        let params: CallToolParams =
            serde_json::from_value(json!({"name": "calculator_add", "arguments": null})).unwrap();
        assert!(params.arguments.is_none());

        let bad = serde_json::from_value::<CallToolParams>(json!({"name": "x", "arguments": [1]}));
        assert!(bad.is_err());
    }
}
