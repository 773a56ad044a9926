//! End-to-end tests of MCP requests routed through the tool catalog

use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};

use nerve_mcp_server::{
    config::Config,
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request, Response},
    },
    AppState,
};

fn test_state(server: &ServerGuard) -> AppState {
    AppState::new(Config {
        api_base_url: server.url(),
        ..Config::default()
    })
}

fn call_tool(id: i64, name: &str, arguments: Value) -> Request {
    Request {
        jsonrpc: "2.0".into(),
        id: json!(id),
        method: "tools/call".into(),
        params: Some(json!({ "name": name, "arguments": arguments })),
    }
}

async fn send(req: Request, state: &AppState) -> Response {
    handle_mcp_request(req, state.clone())
        .await
        .expect("request with id must get a response")
}

/// Text of the single content block of a tool result.
fn tool_text(resp: &Response) -> String {
    let result = resp.result.as_ref().expect("expected a result");
    assert_eq!(result["content"][0]["type"], "text");
    result["content"][0]["text"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_get_latest_height_returns_bare_text() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({
            "method": "getLatestHeight",
            "params": [9]
        })))
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":1234567}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(call_tool(1, "nerve_get_latest_height", json!({"chainId": 9})), &state).await;

    assert!(resp.error.is_none());
    assert_eq!(tool_text(&resp), "1234567");
    assert!(resp.result.as_ref().unwrap().get("isError").is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rest_tool_defaults_to_get() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/info")
        .with_body("{}")
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(call_tool(2, "nerve_rest", json!({"path": "api/info"})), &state).await;

    assert_eq!(tool_text(&resp), "{}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rest_tool_empty_body_is_reported_as_no_content() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/broadcast")
        .match_body(Matcher::Json(json!({"txHex": "0200"})))
        .with_status(200)
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(
        call_tool(
            3,
            "nerve_rest",
            json!({"path": "/api/broadcast", "method": "POST", "body": {"txHex": "0200"}}),
        ),
        &state,
    )
    .await;

    let text = tool_text(&resp);
    assert_ne!(text, "null");
    assert!(text.contains("empty"));
}

#[tokio::test]
async fn test_validate_address_rejection_is_a_result() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({
            "method": "validateAddress",
            "params": [9, "NERVEnotreal"]
        })))
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":false}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(
        call_tool(4, "nerve_validate_address", json!({"chainId": 9, "address": "NERVEnotreal"})),
        &state,
    )
    .await;

    assert!(resp.error.is_none());
    let parsed: Value = serde_json::from_str(&tool_text(&resp)).unwrap();
    assert_eq!(parsed, json!({"valid": false}));
}

#[tokio::test]
async fn test_validate_address_null_result_passes_through() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/jsonrpc")
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":null}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(
        call_tool(15, "nerve_validate_address", json!({"chainId": 9, "address": "NERVEx"})),
        &state,
    )
    .await;

    assert!(resp.result.as_ref().unwrap().get("isError").is_none());
    let parsed: Value = serde_json::from_str(&tool_text(&resp)).unwrap();
    assert_eq!(parsed, json!({"valid": null}));
}

#[tokio::test]
async fn test_remote_500_becomes_tool_error_with_status_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/jsonrpc")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(call_tool(5, "nerve_get_tx", json!({"chainId": 9, "hash": "abc"})), &state).await;

    let result = resp.result.as_ref().unwrap();
    assert_eq!(result["isError"], json!(true));
    let text = tool_text(&resp);
    assert!(text.contains("500"), "{}", text);
    assert!(text.contains("internal error"), "{}", text);
}

#[tokio::test]
async fn test_rpc_error_surfaces_remote_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/jsonrpc")
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":{},"error":{"code":-32601,"message":"method not found"}}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(
        call_tool(6, "nerve_jsonrpc", json!({"method": "getNothing"})),
        &state,
    )
    .await;

    assert_eq!(resp.result.as_ref().unwrap()["isError"], json!(true));
    assert!(tool_text(&resp).contains("method not found"));
}

#[tokio::test]
async fn test_jsonrpc_passthrough_forwards_method_and_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({
            "method": "getSwapPairInfo",
            "params": [9, "NERVEepb6...", {"x": [1, 2]}]
        })))
        .with_body(r#"{"result":{"reserve0":"100"}}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(
        call_tool(
            7,
            "nerve_jsonrpc",
            json!({"method": "getSwapPairInfo", "params": [9, "NERVEepb6...", {"x": [1, 2]}]}),
        ),
        &state,
    )
    .await;

    let parsed: Value = serde_json::from_str(&tool_text(&resp)).unwrap();
    assert_eq!(parsed, json!({"reserve0": "100"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_jsonrpc_passthrough_defaults_params_to_empty_list() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({"method": "info", "params": []})))
        .with_body(r#"{"result":{"chainId":9}}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    send(call_tool(8, "nerve_jsonrpc", json!({"method": "info"})), &state).await;
    mock.assert_async().await;
}

#[tokio::test]
async fn test_balance_list_sends_empty_asset_list_when_omitted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({
            "method": "getBalanceList",
            "params": [9, "NERVEepb6...", []]
        })))
        .with_body(r#"{"result":[]}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(
        call_tool(9, "nerve_get_balance_list", json!({"chainId": 9, "address": "NERVEepb6..."})),
        &state,
    )
    .await;

    assert_eq!(tool_text(&resp), "[]");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_account_balance_coerces_integer_strings() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({
            "method": "getAccountBalance",
            "params": [9, 9, 1, "NERVEepb6..."]
        })))
        .with_body(r#"{"result":{"balance":"1000"}}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    send(
        call_tool(
            10,
            "nerve_get_account_balance",
            json!({"chainId": "9", "assetChainId": 9, "assetId": "1", "address": "NERVEepb6..."}),
        ),
        &state,
    )
    .await;
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_tool_makes_no_network_call() {
    let mut server = Server::new_async().await;
    let any_post = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let any_get = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let state = test_state(&server);

    let resp = send(call_tool(11, "get_latest_height_v2", json!({"chainId": 9})), &state).await;

    let error = resp.error.expect("unknown tool must be an error");
    assert_eq!(error.code, error_codes::INVALID_PARAMS);
    assert!(error.message.contains("get_latest_height_v2"));
    assert_eq!(state.client.last_request_id(), 0);
    any_post.assert_async().await;
    any_get.assert_async().await;
}

#[tokio::test]
async fn test_invalid_argument_names_field_and_constraint() {
    let server = Server::new_async().await;
    let state = test_state(&server);

    let resp = send(
        call_tool(12, "nerve_get_block_by_height", json!({"chainId": 9, "height": -1})),
        &state,
    )
    .await;

    let error = resp.error.expect("invalid argument must be an error");
    assert_eq!(error.code, error_codes::INVALID_PARAMS);
    assert!(error.message.contains("height"));
    assert_eq!(error.data.unwrap()["field"], "height");
}

#[tokio::test]
async fn test_rest_tool_rejects_unlisted_method() {
    let server = Server::new_async().await;
    let state = test_state(&server);

    let resp = send(
        call_tool(13, "nerve_rest", json!({"path": "api/info", "method": "DELETE"})),
        &state,
    )
    .await;

    assert_eq!(resp.error.unwrap().code, error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn test_tool_name_accepted_as_direct_method() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({"method": "getAgentList", "params": [9]})))
        .with_body(r#"{"result":[{"agentHash":"ab"}]}"#)
        .create_async()
        .await;
    let state = test_state(&server);

    let req = Request {
        jsonrpc: "2.0".into(),
        id: json!(14),
        method: "nerve_get_agent_list".into(),
        params: Some(json!({"chainId": 9})),
    };
    let resp = send(req, &state).await;

    let parsed: Value = serde_json::from_str(&tool_text(&resp)).unwrap();
    assert_eq!(parsed, json!([{"agentHash": "ab"}]));
}

#[tokio::test]
async fn test_tools_list_and_initialize() {
    let server = Server::new_async().await;
    let state = test_state(&server);

    let init = send(
        Request {
            jsonrpc: "2.0".into(),
            id: json!(1),
            method: "initialize".into(),
            params: Some(json!({})),
        },
        &state,
    )
    .await;
    assert_eq!(init.result.unwrap()["serverInfo"]["name"], "nerve-rpc-mcp");

    let list = send(
        Request {
            jsonrpc: "2.0".into(),
            id: json!(2),
            method: "tools/list".into(),
            params: None,
        },
        &state,
    )
    .await;
    let tools = list.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 14);
    let rest = tools.iter().find(|t| t["name"] == "nerve_rest").unwrap();
    assert_eq!(rest["inputSchema"]["required"], json!(["path"]));
    assert_eq!(rest["inputSchema"]["properties"]["method"]["default"], "GET");
}

#[tokio::test]
async fn test_notifications_and_unknown_methods() {
    let server = Server::new_async().await;
    let state = test_state(&server);

    let notification = Request {
        jsonrpc: "2.0".into(),
        id: Value::Null,
        method: "notifications/initialized".into(),
        params: None,
    };
    assert!(handle_mcp_request(notification, state.clone()).await.is_none());

    let resp = send(
        Request {
            jsonrpc: "2.0".into(),
            id: json!(3),
            method: "resources/list".into(),
            params: None,
        },
        &state,
    )
    .await;
    assert_eq!(resp.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
}
