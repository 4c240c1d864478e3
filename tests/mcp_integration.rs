//! Integration tests for MCP protocol handling.
//!
//! These tests verify the JSON-RPC 2.0 protocol implementation, including
//! request/response handling, error responses, and lifecycle management.

use std::sync::Arc;

use serde_json::{json, Value};
use ui_docs_mcp::docs::{Catalog, ComponentDoc, ComponentRegistry, PropDoc, SubComponent};
use ui_docs_mcp::mcp::handler::ServerState;
use ui_docs_mcp::mcp::protocol::{parse_message, IncomingMessage, RequestId};
use ui_docs_mcp::mcp::McpHandler;

// =============================================================================
// Protocol Parsing Tests
// =============================================================================

#[test]
fn test_parse_initialize_request() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {
                "name": "test-client",
                "version": "1.0.0"
            }
        }
    }"#;

    let result = parse_message(json);
    assert!(result.is_ok());

    if let IncomingMessage::Request(req) = result.unwrap() {
        assert_eq!(req.method, "initialize");
        assert_eq!(req.id, RequestId::Number(1));
    } else {
        panic!("Expected Request");
    }
}

#[test]
fn test_parse_resources_read_request() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": "read-1",
        "method": "resources/read",
        "params": { "uri": "components://list" }
    }"#;

    if let IncomingMessage::Request(req) = parse_message(json).unwrap() {
        assert_eq!(req.method, "resources/read");
        assert_eq!(req.id, RequestId::String("read-1".to_string()));
    } else {
        panic!("Expected Request");
    }
}

#[test]
fn test_parse_notification() {
    let json = r#"{
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    }"#;

    if let IncomingMessage::Notification(notif) = parse_message(json).unwrap() {
        assert_eq!(notif.method, "notifications/initialized");
    } else {
        panic!("Expected Notification");
    }
}

#[test]
fn test_parse_missing_jsonrpc_version() {
    let json = r#"{"id": 1, "method": "ping"}"#;
    assert!(parse_message(json).is_err());
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

fn registry() -> Arc<ComponentRegistry> {
    let mut button = ComponentDoc::new("Button");
    button.description = "Displays a button.".to_string();
    button.import_statement = "import { Button } from '@/components/ui';".to_string();
    button
        .props
        .push(PropDoc::optional("disabled", "boolean", "Disables the button"));

    let mut tabs = ComponentDoc::new("Tabs");
    tabs.description = "Layered sections of content.".to_string();
    tabs.import_statement = "import { Tabs, TabsList } from '@/components/ui';".to_string();
    tabs.sub_components.push(SubComponent {
        name: "TabsList".to_string(),
        description: "Holds the triggers.".to_string(),
    });

    Arc::new(ComponentRegistry::from_catalog(Catalog::new(vec![button, tabs])))
}

fn send(handler: &mut McpHandler, message: &Value) -> Option<Value> {
    handler
        .handle_raw(&message.to_string())
        .map(|reply| serde_json::from_str(&reply.to_json().unwrap()).unwrap())
}

fn call_tool(handler: &mut McpHandler, id: i64, name: &str, arguments: Value) -> Value {
    let reply = send(
        handler,
        &json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .unwrap();
    reply["result"].clone()
}

fn tool_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap()
}

fn initialised_handler() -> McpHandler {
    let mut handler = McpHandler::new(registry());
    let reply = send(
        &mut handler,
        &json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "capabilities": {} }
        }),
    )
    .unwrap();
    assert_eq!(reply["result"]["protocolVersion"], "2024-11-05");

    let none = send(
        &mut handler,
        &json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    );
    assert!(none.is_none());
    assert_eq!(handler.state(), ServerState::Running);
    handler
}

#[test]
fn test_full_lifecycle() {
    let mut handler = initialised_handler();

    let tools = send(
        &mut handler,
        &json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
    )
    .unwrap();
    let names: Vec<_> = tools["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "list_components",
            "get_component",
            "get_component_props",
            "get_component_examples",
            "search_components",
            "generate_snippet"
        ]
    );

    let resources = send(
        &mut handler,
        &json!({ "jsonrpc": "2.0", "id": 3, "method": "resources/list" }),
    )
    .unwrap();
    assert_eq!(resources["result"]["resources"][0]["uri"], "components://list");
}

#[test]
fn test_requests_before_initialisation_fail() {
    let mut handler = McpHandler::new(registry());
    let reply = send(
        &mut handler,
        &json!({ "jsonrpc": "2.0", "id": 1, "method": "resources/list" }),
    )
    .unwrap();
    assert_eq!(reply["error"]["code"], -32600);
}

#[test]
fn test_search_by_sub_component_description() {
    let mut handler = initialised_handler();
    let result = call_tool(&mut handler, 5, "search_components", json!({ "query": "TRIGGERS" }));
    let payload: Value = serde_json::from_str(tool_text(&result)).unwrap();
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["results"][0]["name"], "Tabs");
    assert_eq!(payload["results"][0]["hasSubComponents"], true);
}

#[test]
fn test_get_component_props() {
    let mut handler = initialised_handler();
    let result = call_tool(&mut handler, 6, "get_component_props", json!({ "name": "BUTTON" }));
    let payload: Value = serde_json::from_str(tool_text(&result)).unwrap();
    assert_eq!(payload["name"], "Button");
    assert_eq!(payload["props"][0]["name"], "disabled");
    assert_eq!(payload["props"][0]["type"], "boolean");
}

#[test]
fn test_generate_snippet_not_found() {
    let mut handler = initialised_handler();
    let result = call_tool(
        &mut handler,
        7,
        "generate_snippet",
        json!({ "componentName": "Carousel" }),
    );
    assert_eq!(result["isError"], true);
    assert!(tool_text(&result).contains("not found"));
}

#[test]
fn test_generate_snippet_uses_import_statement() {
    let mut handler = initialised_handler();
    let result = call_tool(
        &mut handler,
        8,
        "generate_snippet",
        json!({ "componentName": "tabs", "props": { "defaultValue": "account" } }),
    );
    let payload: Value = serde_json::from_str(tool_text(&result)).unwrap();
    assert_eq!(
        payload["importStatement"],
        "import { Tabs, TabsList } from '@/components/ui';"
    );
    assert_eq!(payload["snippet"], "<Tabs defaultValue=\"account\">Tabs</Tabs>");
}

#[test]
fn test_read_component_resource() {
    let mut handler = initialised_handler();
    let reply = send(
        &mut handler,
        &json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "resources/read",
            "params": { "uri": "components://tabs" }
        }),
    )
    .unwrap();
    let text = reply["result"]["contents"][0]["text"].as_str().unwrap();
    let doc: Value = serde_json::from_str(text).unwrap();
    assert_eq!(doc["name"], "Tabs");
    assert_eq!(doc["subComponents"][0]["name"], "TabsList");
}
