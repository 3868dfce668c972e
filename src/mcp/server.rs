//! MCP server implementation
//!
//! Reads newline-delimited JSON-RPC requests, dispatches them against the
//! tool registry and writes one response line per request. Requests are
//! served strictly one at a time.
//!
//! Failures are reported in two tiers. Requests that cannot be understood
//! (bad JSON, unknown method, malformed call params) get a JSON-RPC `error`.
//! Failures of a tool call (unknown tool, bad argument, tool error) get a
//! normal `result` flagged `isError: true`.

use crate::config::ServerSettings;
use crate::mcp::coerce::coerce_arguments;
use crate::mcp::protocol::*;
use crate::mcp::schema::derive_schema;
use crate::tools::{ToolArgs, ToolRegistry};
use crate::types::ToolError;
use anyhow::Result;
use serde_json::{Map, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

const NOTIFICATION_INITIALIZED: &str = "notifications/initialized";

pub struct McpServer {
    registry: Arc<ToolRegistry>,
    settings: ServerSettings,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>, settings: ServerSettings) -> Self {
        Self { registry, settings }
    }

    /// Run the MCP server on stdio until the client disconnects
    pub async fn run(&self) -> Result<()> {
        info!("MCP server starting on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve requests from `reader`, writing responses to `writer`.
    ///
    /// Returns at end of stream. A read or write error ends the loop and is
    /// returned to the caller.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Serving {} registered tool(s)", self.registry.len());

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = match reader.read_until(b'\n', &mut buf).await {
                Ok(read) => read,
                Err(e) => {
                    error!("Failed to read line: {}", e);
                    return Err(e.into());
                }
            };

            if read == 0 {
                info!("Client closed connection");
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            debug!("Received request: {}", line);

            let Some(response) = self.handle_line(line) else {
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            if let Err(e) = write_line(&mut writer, &response_json).await {
                error!("Failed to write response: {}", e);
                return Err(e.into());
            }

            debug!("Sent response: {}", response_json);
        }
    }

    /// Handle one raw input line. `None` means nothing is written back.
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => return Some(parse_error(format!("Parse error: {}", e))),
        };

        if !value.is_object() {
            return Some(parse_error("Parse error: request must be a JSON object"));
        }

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request),
            Err(e) => Some(parse_error(format!("Parse error: {}", e))),
        }
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let jsonrpc = request
            .jsonrpc
            .unwrap_or_else(|| JSONRPC_VERSION.to_string());
        let id = request.id.unwrap_or(Value::Null);
        let method = request.method.unwrap_or_default();

        let result = match method.as_str() {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_list_tools(),
            "tools/call" => self.handle_call_tool(request.params),
            NOTIFICATION_INITIALIZED => {
                debug!("Client initialized");
                return None;
            }
            _ => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        };

        Some(match result {
            Ok(result) => JsonRpcResponse::success(jsonrpc, id, result),
            Err(error) => JsonRpcResponse::failure(jsonrpc, id, error),
        })
    }

    fn handle_initialize(&self) -> Result<Value, JsonRpcError> {
        let result = InitializeResult {
            protocol_version: self.settings.protocol_version.clone(),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo {
                name: self.settings.name.clone(),
                version: self.settings.version.clone(),
            },
        };

        serde_json::to_value(result).map_err(internal_error)
    }

    fn handle_list_tools(&self) -> Result<Value, JsonRpcError> {
        let tools = self
            .registry
            .list_all()
            .map(|(key, signature)| Tool {
                name: key.to_string(),
                description: signature.description.clone(),
                input_schema: derive_schema(signature),
            })
            .collect();

        serde_json::to_value(ListToolsResult { tools }).map_err(internal_error)
    }

    fn handle_call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| {
                JsonRpcError::new(INVALID_PARAMS, format!("Invalid tool call params: {}", e))
            })?;

        let arguments = params.arguments.unwrap_or_default();

        let result = match self.call_tool(&params.name, &arguments) {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                match &e {
                    ToolError::UnknownTool(_) => warn!("{}", e),
                    _ => error!("Tool '{}' failed: {}", params.name, e),
                }
                CallToolResult::error(format!("{}{}", self.settings.error_prefix, e))
            }
        };

        serde_json::to_value(result).map_err(internal_error)
    }

    /// Look up, coerce and invoke. Panics inside a tool are reported as errors.
    fn call_tool(&self, name: &str, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let tool = self
            .registry
            .lookup(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let values = coerce_arguments(tool.signature(), arguments)?;
        let args = ToolArgs::new(tool.signature(), values);

        debug!("Invoking tool '{}'", tool.key);
        catch_unwind(AssertUnwindSafe(|| tool.invoke(&args)))
            .unwrap_or_else(|payload| Err(ToolError::Invocation(panic_message(payload.as_ref()))))
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

fn parse_error(message: impl Into<String>) -> JsonRpcResponse {
    JsonRpcResponse::failure(
        JSONRPC_VERSION,
        Value::Null,
        JsonRpcError::new(PARSE_ERROR, message),
    )
}

fn internal_error(e: serde_json::Error) -> JsonRpcError {
    JsonRpcError::new(INTERNAL_ERROR, format!("Failed to serialize result: {}", e))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
