/// Integration tests for the MCP stdio server
use serde_json::{json, Value};
use vapi_mcp_core::mcp::types::codes;
use vapi_mcp_core::{vapi_registry, McpServer, VapiConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_for(base_url: &str) -> McpServer {
    let config = VapiConfig::new("test-key", "pn_outbound").with_base_url(base_url);
    McpServer::new(vapi_registry(config).unwrap())
}

async fn rpc(server: &McpServer, request: Value) -> Value {
    let response = server
        .handle_line(&request.to_string())
        .await
        .expect("request should be answered");
    serde_json::to_value(response).unwrap()
}

fn envelope_of(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_initialize_and_ping() {
    let server = server_for("http://127.0.0.1:9");

    let init = rpc(
        &server,
        json!({"jsonrpc": "2.0", "id": "init", "method": "initialize", "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "inspector", "version": "1.0"}
        }}),
    )
    .await;

    assert_eq!(init["id"], "init");
    assert_eq!(init["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(init["result"]["capabilities"]["tools"]["listChanged"], false);
    assert_eq!(init["result"]["serverInfo"]["name"], "vapi");

    let pong = rpc(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).await;
    assert_eq!(pong["result"], json!({}));
}

#[tokio::test]
async fn test_tools_list_schemas() {
    let server = server_for("http://127.0.0.1:9");
    let response = rpc(&server, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})).await;

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 4);

    let make_call = tools.iter().find(|t| t["name"] == "make_call").unwrap();
    assert_eq!(make_call["inputSchema"]["required"], json!(["phone_number", "task"]));
    assert!(make_call["inputSchema"]["properties"]["assistant_name"].is_object());
}

#[tokio::test]
async fn test_tools_call_make_call_success() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/call"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"status": "queued", "id": "abc123"})),
        )
        .expect(1)
        .mount(&api)
        .await;

    let server = server_for(&api.uri());
    let response = rpc(
        &server,
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {
            "name": "make_call",
            "arguments": {"phone_number": "+15551234567", "task": "remind about appointment"}
        }}),
    )
    .await;

    assert_eq!(response["result"]["isError"], false);
    let envelope = envelope_of(&response);
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["call_id"], "abc123");
}

#[tokio::test]
async fn test_tool_failure_is_result_not_rpc_error() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/phone-number/pn_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&api)
        .await;

    let server = server_for(&api.uri());
    let response = rpc(
        &server,
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {
            "name": "get_phone_number",
            "arguments": {"phone_number_id": "pn_1"}
        }}),
    )
    .await;

    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["isError"], true);
    let envelope = envelope_of(&response);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["details"], "boom");
}

#[tokio::test]
async fn test_protocol_errors() {
    let server = server_for("http://127.0.0.1:9");

    let unknown_tool = rpc(
        &server,
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {"name": "send_fax"}}),
    )
    .await;
    assert_eq!(unknown_tool["error"]["code"], codes::INVALID_PARAMS);

    let unknown_method = rpc(&server, json!({"jsonrpc": "2.0", "id": 6, "method": "resources/list"})).await;
    assert_eq!(unknown_method["error"]["code"], codes::METHOD_NOT_FOUND);

    let missing_params = rpc(&server, json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call"})).await;
    assert_eq!(missing_params["error"]["code"], codes::INVALID_PARAMS);

    let garbage = server.handle_line("{not json").await.unwrap();
    let garbage = serde_json::to_value(garbage).unwrap();
    assert_eq!(garbage["error"]["code"], codes::PARSE_ERROR);
    assert_eq!(garbage["id"], Value::Null);

    let bad_request = rpc(&server, json!({"jsonrpc": "2.0", "id": 8})).await;
    assert_eq!(bad_request["error"]["code"], codes::INVALID_REQUEST);
    assert_eq!(bad_request["id"], 8);
}

#[tokio::test]
async fn test_notifications_are_not_answered() {
    let server = server_for("http://127.0.0.1:9");
    let response = server
        .handle_line(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string())
        .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_null_id_request_is_answered() {
    let server = server_for("http://127.0.0.1:9");
    let response = rpc(&server, json!({"jsonrpc": "2.0", "id": null, "method": "ping"})).await;
    assert_eq!(response["id"], Value::Null);
    assert_eq!(response["result"], json!({}));
}
