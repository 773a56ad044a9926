//! # MCP Handler Module
//!
//! Implements the Model Context Protocol surface of the Nerve server. It
//! answers `initialize`, `ping` and `tools/list`, and routes `tools/call` into
//! the [`ToolRegistry`](crate::mcp::tools::ToolRegistry).
//!
//! Argument problems and unknown tool names come back as JSON-RPC errors.
//! Failures reported by the Nerve API itself come back as a tool result with
//! `isError: true`, so the agent can read the remote message.

use crate::{
    mcp::{
        protocol::{error_codes, CallToolResult, Request, Response},
        tools::{format, ToolError},
    },
    utils, AppState,
};
use serde_json::{json, Value};
use tracing::{info, warn};

pub const SERVER_NAME: &str = "nerve-rpc-mcp";
pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id, json!({})),
        "tools/list" => handle_tools_list(&req, &state),
        "tools/call" => handle_tool_call(req, state).await,
        // Catalog tool names are accepted as direct methods and rewritten into
        // tools/call so the same path handles both.
        name if state.tools.contains(name) => {
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": name,
                    "arguments": req.params.clone().unwrap_or_else(|| json!({}))
                })),
            };
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request by dispatching it to the correct tool.
async fn handle_tool_call(req: Request, state: AppState) -> Response {
    let empty = json!({});
    let params = req.params.as_ref().unwrap_or(&empty);

    let tool_name = match utils::get_required_arg::<String>(params, "name", &req.id) {
        Ok(name) => name,
        Err(resp) => return resp,
    };
    let arguments = params.get("arguments");

    let outcome = state
        .tools
        .dispatch(&state.client, &tool_name, arguments)
        .await;

    match outcome {
        Ok(output) => tool_result(req.id, CallToolResult::text(format::render(&output))),
        Err(ToolError::UnknownTool(name)) => {
            warn!(tool = %name, "Unknown tool requested");
            Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                format!("Unknown tool: {}", name),
            )
        }
        Err(ToolError::InvalidArgument { field, reason }) => {
            warn!(tool = %tool_name, %field, %reason, "Invalid tool arguments");
            Response::error_with_data(
                req.id,
                error_codes::INVALID_PARAMS,
                format!("Invalid argument '{}': {}", field, reason),
                json!({ "field": field, "reason": reason }),
            )
        }
        Err(ToolError::Client(err)) => {
            warn!(tool = %tool_name, error = %err, "Tool call failed");
            tool_result(req.id, CallToolResult::failure(err.to_string()))
        }
    }
}

fn tool_result(id: Value, result: CallToolResult) -> Response {
    match serde_json::to_value(result) {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

fn handle_initialize(req: &Request) -> Response {
    let server_info = json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({ "tools": { "listChanged": false } });
    let instructions =
        "Nerve blockchain JSON-RPC and REST API exposed as tools: chain info, blocks, transactions, balances and consensus nodes.";

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

/// Handles the 'tools/list' request with the definitions of the whole catalog.
fn handle_tools_list(req: &Request, state: &AppState) -> Response {
    Response::success(
        req.id.clone(),
        json!({ "tools": state.tools.definitions() }),
    )
}
