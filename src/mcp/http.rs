//! HTTP front end for the MCP server.
//!
//! # Routes
//!
//! | Method | Path                         | Purpose                              |
//! |--------|------------------------------|--------------------------------------|
//! | GET    | `/`                          | Server information                   |
//! | GET    | `/health`                    | Liveness check with component count  |
//! | GET    | `/sse`                       | Opens a session event stream         |
//! | POST   | `/messages?sessionId=<id>`   | Posts a JSON-RPC message to a session|
//!
//! Cross-origin requests are allowed from anywhere.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::docs::ComponentRegistry;
use crate::mcp::protocol::{MCP_PROTOCOL_VERSION, SERVER_NAME};
use crate::mcp::transport::{SessionStream, SessionTable, MESSAGES_PATH};

/// Shared state behind every route.
#[derive(Debug)]
pub struct AppState {
    /// Catalog every session answers from.
    pub registry: Arc<ComponentRegistry>,
    /// Live sessions.
    pub sessions: Arc<SessionTable>,
}

impl AppState {
    /// Creates state with no open sessions.
    #[must_use]
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            registry,
            sessions: Arc::new(SessionTable::new()),
        }
    }
}

/// The MCP server for component documentation.
#[derive(Debug)]
pub struct McpServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl McpServer {
    /// Creates a server answering from `registry`.
    #[must_use]
    pub fn new(registry: Arc<ComponentRegistry>, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(registry)),
            config,
        }
    }

    /// Builds the router with all routes.
    #[must_use]
    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.state))
    }

    /// Live sessions.
    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionTable> {
        &self.state.sessions
    }

    /// Address the server binds to, as `host:port`.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Runs the server until SIGINT/SIGTERM (Ctrl+C on Windows).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(&self) -> std::io::Result<()> {
        let listener =
            tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let local = listener.local_addr()?;

        info!(
            address = %local,
            components = self.state.registry.list().len(),
            "MCP server listening"
        );
        info!("SSE endpoint: http://{local}/sse");
        info!("Message endpoint: http://{local}{MESSAGES_PATH}?sessionId=<id>");

        let sessions = Arc::clone(&self.state.sessions);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                // open event streams would otherwise hold the shutdown
                sessions.close_all();
            })
            .await?;

        info!("MCP server stopped");
        Ok(())
    }
}

/// Waits for a shutdown signal.
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (Ok(mut sigint), Ok(mut sigterm)) = (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) else {
        warn!("Failed to install signal handlers; shutdown on signal disabled");
        return std::future::pending().await;
    };

    tokio::select! {
        _ = sigint.recv() => info!("Received SIGINT, initiating graceful shutdown"),
        _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

/// Waits for a shutdown signal.
#[cfg(windows)]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, initiating graceful shutdown");
    } else {
        warn!("Failed to install Ctrl+C handler; shutdown on signal disabled");
        std::future::pending::<()>().await;
    }
}

/// Creates the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(server_info))
        .route("/health", get(health))
        .route("/sse", get(open_session))
        .route(MESSAGES_PATH, post(post_message))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: &'static str,
    /// Time of the check (RFC 3339).
    pub timestamp: String,
    /// Number of components in the catalog.
    pub components: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        components: state.registry.list().len(),
    })
}

async fn server_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let metadata = state.registry.metadata();
    Json(json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "transport": "sse",
        "endpoints": {
            "sse": "/sse",
            "messages": format!("{MESSAGES_PATH}?sessionId=<id>"),
            "health": "/health",
        },
        "catalog": metadata,
        "sessions": state.sessions.len(),
    }))
}

async fn open_session(State(state): State<Arc<AppState>>) -> Sse<SessionStream> {
    let stream = state.sessions.open(Arc::clone(&state.registry));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Query string of the message endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    /// Target session.
    pub session_id: Option<String>,
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Response {
    let Some(session_id) = query.session_id.filter(|id| !id.is_empty()) else {
        return bad_request("Missing sessionId query parameter");
    };

    let Some(session) = state.sessions.get(&session_id) else {
        warn!(session = %session_id, "Message for unknown session");
        return bad_request("Invalid or expired sessionId");
    };

    session.handle(&body).await;
    (StatusCode::ACCEPTED, "Accepted").into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
