//! MCP server setup and lifecycle.
//!
//! Implements a JSON-RPC based MCP server over stdio. Each request works
//! against a freshly loaded document batch; the server itself holds no
//! state beyond the configured path list, so requests are independent.
//!
//! stdout carries protocol frames only; all diagnostics go to stderr via
//! `tracing`.

use crate::mcp::{PromptRegistry, ResourceHandler, ToolRegistry};
use crate::org::{KnowledgeIndex, load_documents};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{Instrument, info_span};

/// MCP protocol version.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name.
const SERVER_NAME: &str = "orgmcp";

/// MCP server for an org knowledge base.
pub struct McpServer {
    /// Configured org file paths, in canonical batch order.
    paths: Vec<PathBuf>,
    /// Resource handler.
    resources: ResourceHandler,
    /// Prompt registry.
    prompts: PromptRegistry,
    /// Tool registry.
    tools: ToolRegistry,
}

impl McpServer {
    /// Creates a new MCP server over the configured path list.
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            resources: ResourceHandler::new(paths.clone()),
            prompts: PromptRegistry::new(),
            tools: ToolRegistry::new(),
            paths,
        }
    }

    /// Starts the server over stdio.
    ///
    /// Runs until stdin reaches EOF.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn start(&self) -> Result<()> {
        tracing::info!(files = self.paths.len(), "Starting MCP server on stdio");

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        while let Some(line) = lines.next_line().await.map_err(|e| Error::OperationFailed {
            operation: "read_stdin".to_string(),
            cause: e.to_string(),
        })? {
            if line.is_empty() {
                continue;
            }

            let response = self.handle_request(&line).await;

            write_frame(&mut stdout, &response)
                .await
                .map_err(|e| Error::OperationFailed {
                    operation: "write_stdout".to_string(),
                    cause: e.to_string(),
                })?;
        }

        Ok(())
    }

    /// Handles a JSON-RPC request line.
    async fn handle_request(&self, request: &str) -> String {
        let start = Instant::now();

        let span = info_span!(
            "mcp.request",
            rpc.method = tracing::field::Empty,
            status = tracing::field::Empty
        );

        let parsed: std::result::Result<JsonRpcRequest, _> = serde_json::from_str(request);
        let mut method_label = "parse_error".to_string();
        let status_label;

        let response = match parsed {
            Ok(req) => {
                method_label.clone_from(&req.method);
                span.record("rpc.method", method_label.as_str());
                tracing::debug!(parent: &span, method = %method_label, "Processing MCP request");

                let result = self
                    .dispatch_method(&req.method, req.params)
                    .instrument(span.clone())
                    .await;
                status_label = if result.is_ok() { "success" } else { "error" };
                span.record("status", status_label);
                format_response(req.id, result)
            },
            Err(e) => {
                status_label = "parse_error";
                span.record("status", status_label);
                format_error(None, -32700, &format!("Parse error: {e}"))
            },
        };

        metrics::counter!(
            "mcp_requests_total",
            "method" => method_label.clone(),
            "status" => status_label
        )
        .increment(1);
        metrics::histogram!("mcp_request_duration_ms", "method" => method_label)
            .record(start.elapsed().as_secs_f64() * 1000.0);

        response
    }

    /// Dispatches a method call to its handler.
    async fn dispatch_method(&self, method: &str, params: Option<Value>) -> DispatchResult {
        match method {
            "initialize" => Ok(Self::handle_initialize()),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => Ok(self.handle_list_tools()),
            "tools/call" => self.handle_call_tool(params),
            "resources/list" => self.handle_list_resources().await,
            "resources/read" => self.handle_read_resource(params).await,
            "prompts/list" => self.handle_list_prompts().await,
            "prompts/get" => self.handle_get_prompt(params),
            unknown => Err((-32601, format!("Method not found: {unknown}"))),
        }
    }

    /// Handles the initialize method.
    fn handle_initialize() -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {},
                "prompts": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    /// Handles tools/list.
    fn handle_list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .list_tools()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        serde_json::json!({ "tools": tools })
    }

    /// Handles tools/call.
    fn handle_call_tool(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((-32602, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or((-32602, "Missing tool name".to_string()))?;

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        // Tool failures surface as error results, not protocol errors.
        match self.tools.execute(name, arguments) {
            Ok(result) => Ok(serde_json::json!({
                "content": result.content,
                "isError": result.is_error
            })),
            Err(e) => Ok(serde_json::json!({
                "content": [{ "type": "text", "text": e.to_string() }],
                "isError": true
            })),
        }
    }

    /// Handles resources/list.
    async fn handle_list_resources(&self) -> DispatchResult {
        let resources = self
            .resources
            .list_resources()
            .await
            .map_err(|e| (error_code(&e), e.to_string()))?;

        let resources: Vec<Value> = resources
            .iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect();

        Ok(serde_json::json!({ "resources": resources }))
    }

    /// Handles resources/read.
    async fn handle_read_resource(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((-32602, "Missing params".to_string()))?;

        let uri = params
            .get("uri")
            .and_then(Value::as_str)
            .ok_or((-32602, "Missing resource URI".to_string()))?;

        let span = info_span!("mcp.resource.read", resource.uri = uri);
        let start = Instant::now();

        let result = self.resources.read_resource(uri).instrument(span).await;
        let status_label = if result.is_ok() { "success" } else { "error" };
        metrics::counter!("mcp_resource_reads_total", "status" => status_label).increment(1);
        metrics::histogram!("mcp_resource_read_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        let content = result.map_err(|e| (error_code(&e), e.to_string()))?;
        Ok(serde_json::json!({
            "contents": [{
                "uri": content.uri,
                "mimeType": content.mime_type,
                "text": content.text
            }]
        }))
    }

    /// Handles prompts/list.
    ///
    /// Loads a fresh batch so the summarize prompt can name the categories
    /// that currently exist.
    async fn handle_list_prompts(&self) -> DispatchResult {
        let documents = load_documents(&self.paths)
            .await
            .map_err(|e| (error_code(&e), e.to_string()))?;
        let index = KnowledgeIndex::build(&documents);
        let categories: Vec<String> = index.categories().map(ToString::to_string).collect();

        let prompts: Vec<Value> = self
            .prompts
            .list_prompts(&categories)
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments.iter().map(|a| {
                        serde_json::json!({
                            "name": a.name,
                            "description": a.description,
                            "required": a.required
                        })
                    }).collect::<Vec<Value>>()
                })
            })
            .collect();

        Ok(serde_json::json!({ "prompts": prompts }))
    }

    /// Handles prompts/get.
    fn handle_get_prompt(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((-32602, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or((-32602, "Missing prompt name".to_string()))?;
        let span = info_span!("mcp.prompt.get", prompt.name = name);
        let _guard = span.enter();

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        let messages = self
            .prompts
            .get_prompt_messages(name, &arguments)
            .map_err(|e| (error_code(&e), e.to_string()))?;

        let msgs: Vec<Value> = messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role,
                    "content": m.content
                })
            })
            .collect();

        Ok(serde_json::json!({ "messages": msgs }))
    }
}

/// Writes one newline-delimited response frame.
async fn write_frame(
    stdout: &mut tokio::io::Stdout,
    response: &str,
) -> std::io::Result<()> {
    stdout.write_all(response.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

/// Maps an error to its JSON-RPC code.
///
/// Invalid addresses and bad parameters are client errors; well-formed
/// addresses matching nothing use the MCP resource-not-found code; I/O
/// and everything else is internal.
const fn error_code(error: &Error) -> i32 {
    match error {
        Error::InvalidAddress(_) | Error::InvalidInput(_) => -32602,
        Error::NotFound(_) => -32002,
        Error::Io { .. } | Error::OperationFailed { .. } => -32603,
    }
}

/// Result type for method dispatch.
type DispatchResult = std::result::Result<Value, (i32, String)>;

/// Formats a successful response.
fn format_response(id: Option<Value>, result: DispatchResult) -> String {
    match result {
        Ok(value) => {
            let response = JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(value),
                error: None,
            };
            serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
        },
        Err((code, message)) => format_error(id, code, &message),
    }
}

/// Formats an error response.
fn format_error(id: Option<Value>, code: i32, message: &str) -> String {
    let response = JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
            data: None,
        }),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC version (required by protocol but not used in code).
    #[serde(rename = "jsonrpc")]
    _jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}
