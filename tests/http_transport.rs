//! Integration tests for the HTTP + SSE transport.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`, so no
//! socket is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, BodyDataStream};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use futures::StreamExt;
use serde_json::Value;
use tower::ServiceExt;
use ui_docs_mcp::config::ServerConfig;
use ui_docs_mcp::docs::{Catalog, ComponentDoc, ComponentRegistry};
use ui_docs_mcp::mcp::McpServer;

fn server() -> McpServer {
    let registry = ComponentRegistry::from_catalog(Catalog::new(vec![
        ComponentDoc::new("Button"),
        ComponentDoc::new("Dialog"),
        ComponentDoc::new("Tabs"),
    ]));
    McpServer::new(Arc::new(registry), ServerConfig::default())
}

async fn get(router: &Router, uri: &str) -> axum::response::Response {
    router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(router: &Router, uri: &str, body: &str) -> StatusCode {
    router
        .clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Reads one complete event (terminated by a blank line) from the stream.
async fn next_event(stream: &mut BodyDataStream) -> String {
    let read = async {
        let mut text = String::new();
        while !text.contains("\n\n") {
            let chunk = stream.next().await.expect("stream ended").unwrap();
            text.push_str(std::str::from_utf8(&chunk).unwrap());
        }
        text
    };
    tokio::time::timeout(Duration::from_secs(5), read)
        .await
        .expect("timed out waiting for event")
}

fn event_data(event: &str) -> &str {
    event
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .expect("event has data")
}

/// Opens a session, returning its event stream and message endpoint.
async fn open_session(router: &Router) -> (BodyDataStream, String) {
    let response = get(router, "/sse").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let mut stream = response.into_body().into_data_stream();
    let event = next_event(&mut stream).await;
    assert!(event.starts_with("event: endpoint"));
    let endpoint = event_data(&event).to_string();
    (stream, endpoint)
}

#[tokio::test]
async fn test_health() {
    let server = server();
    let response = get(&server.router(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["components"], 3);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_server_info() {
    let server = server();
    let body = json_body(get(&server.router(), "/").await).await;
    assert_eq!(body["name"], "ui-docs-mcp");
    assert_eq!(body["protocolVersion"], "2024-11-05");
    assert_eq!(body["endpoints"]["sse"], "/sse");
    assert_eq!(body["catalog"]["totalComponents"], 3);
}

#[tokio::test]
async fn test_message_without_session_is_rejected() {
    let server = server();
    let status = post(&server.router(), "/messages", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_message_for_unknown_session_is_rejected() {
    let server = server();
    let status = post(
        &server.router(),
        "/messages?sessionId=00000000-0000-0000-0000-000000000000",
        r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_round_trip() {
    let server = server();
    let router = server.router();
    let (mut stream, endpoint) = open_session(&router).await;
    assert!(endpoint.starts_with("/messages?sessionId="));
    assert_eq!(server.sessions().len(), 1);

    let status = post(
        &router,
        &endpoint,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{}}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let event = next_event(&mut stream).await;
    assert!(event.starts_with("event: message"));
    let reply: Value = serde_json::from_str(event_data(&event)).unwrap();
    assert_eq!(reply["id"], 1);
    assert_eq!(reply["result"]["serverInfo"]["name"], "ui-docs-mcp");

    let status = post(
        &router,
        &endpoint,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let status = post(
        &router,
        &endpoint,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"list_components","arguments":{}}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let reply: Value = serde_json::from_str(event_data(&next_event(&mut stream).await)).unwrap();
    assert_eq!(reply["id"], 2);
    let listing: Value =
        serde_json::from_str(reply["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(listing.as_array().unwrap().len(), 3);

    drop(stream);
    assert!(server.sessions().is_empty());
    assert_eq!(post(&router, &endpoint, "{}").await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_message_is_answered_on_stream() {
    let server = server();
    let router = server.router();
    let (mut stream, endpoint) = open_session(&router).await;

    assert_eq!(post(&router, &endpoint, "{oops").await, StatusCode::ACCEPTED);

    let reply: Value = serde_json::from_str(event_data(&next_event(&mut stream).await)).unwrap();
    assert_eq!(reply["error"]["code"], -32700);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let server = server();
    let router = server.router();
    let (first, first_endpoint) = open_session(&router).await;
    let (mut second, second_endpoint) = open_session(&router).await;

    assert_ne!(first_endpoint, second_endpoint);
    assert_eq!(server.sessions().len(), 2);

    drop(first);
    assert_eq!(server.sessions().len(), 1);

    let ping = r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#;
    assert_eq!(post(&router, &first_endpoint, ping).await, StatusCode::BAD_REQUEST);
    assert_eq!(post(&router, &second_endpoint, ping).await, StatusCode::ACCEPTED);

    let reply: Value = serde_json::from_str(event_data(&next_event(&mut second).await)).unwrap();
    assert_eq!(reply["id"], "p");
}
