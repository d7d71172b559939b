//! Startup wiring for the stdio server

use serde_json::{json, Value};
use tokio::io::BufReader;
use vapi_mcp_core::VapiConfig;
use vapi_mcp_server::build_server;

fn test_config() -> VapiConfig {
    // Nothing listens here; these tests never reach the network
    VapiConfig::new("test-key", "pn_test").with_base_url("http://127.0.0.1:9")
}

#[tokio::test]
async fn test_server_advertises_vapi_tools() {
    let server = build_server(test_config()).unwrap();

    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "0.0.1"}
        }}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    ]
    .iter()
    .map(|v| v.to_string())
    .collect::<Vec<_>>()
    .join("\n");

    let mut output = Vec::new();
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    // The notification gets no answer
    assert_eq!(responses.len(), 2);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "vapi");
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");

    let names: Vec<&str> = responses[1]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["find_assistant", "get_phone_number", "list_assistants", "make_call"]
    );
}

#[tokio::test]
async fn test_missing_argument_is_error_envelope() {
    let server = build_server(test_config()).unwrap();

    let response = server
        .handle_line(
            &json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "tools/call",
                "params": {"name": "make_call", "arguments": {"task": "say hi"}}
            })
            .to_string(),
        )
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["isError"], true);

    let envelope: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(envelope["status"], "error");
    assert!(envelope["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid arguments:"));
}
