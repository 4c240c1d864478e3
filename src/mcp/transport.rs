//! Server-sent events transport for MCP sessions.
//!
//! This module implements the HTTP+SSE transport:
//!
//! - A client opens `GET /sse` and keeps the event stream open
//! - The first event (`endpoint`) tells the client where to post messages
//! - Messages are posted as JSON-RPC to `/messages?sessionId=<id>`
//! - Replies are delivered on the event stream as `message` events
//!
//! # Session Lifetime
//!
//! A session exists from the moment its stream is opened until the stream
//! is dropped. Dropping the [`SessionStream`] (client disconnect or server
//! shutdown) removes the session from the [`SessionTable`]. Sessions are
//! independent: closing one never affects another.

use std::collections::HashMap;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use axum::response::sse::Event;
use futures::Stream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::docs::ComponentRegistry;
use crate::mcp::handler::McpHandler;
use crate::mcp::protocol::OutgoingMessage;

/// Path clients post their messages to.
pub const MESSAGES_PATH: &str = "/messages";

/// One connected client.
#[derive(Debug)]
pub struct Session {
    id: String,
    sender: mpsc::UnboundedSender<Event>,
    handler: tokio::sync::Mutex<McpHandler>,
}

impl Session {
    /// Returns the session identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// URI the client must post its messages to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{MESSAGES_PATH}?sessionId={}", self.id)
    }

    /// Handles one posted message and delivers the reply, if any, on the
    /// session's event stream.
    pub async fn handle(&self, raw: &str) {
        let reply = self.handler.lock().await.handle_raw(raw);
        if let Some(reply) = reply {
            self.deliver(&reply);
        }
    }

    /// Sends `message` as a `message` event.
    ///
    /// Returns `false` if the stream has already closed.
    pub fn deliver(&self, message: &OutgoingMessage) -> bool {
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(session = %self.id, error = %e, "Failed to serialise reply");
                return false;
            }
        };
        self.send(Event::default().event("message").data(json))
    }

    fn send(&self, event: Event) -> bool {
        if self.sender.send(event).is_ok() {
            true
        } else {
            warn!(session = %self.id, "Dropping reply for closed session");
            false
        }
    }
}

/// Registry of live sessions, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Session>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a new session answering from `registry`.
    ///
    /// The returned stream already holds the `endpoint` event. The session
    /// stays registered until the stream is dropped.
    #[must_use]
    pub fn open(self: &Arc<Self>, registry: Arc<ComponentRegistry>) -> SessionStream {
        let id = uuid::Uuid::new_v4().to_string();
        let (sender, receiver) = mpsc::unbounded_channel();
        let session = Arc::new(Session {
            id: id.clone(),
            sender,
            handler: tokio::sync::Mutex::new(McpHandler::new(registry)),
        });

        session.send(Event::default().event("endpoint").data(session.endpoint()));
        let open = {
            let mut sessions = self.lock();
            sessions.insert(id.clone(), session);
            sessions.len()
        };
        info!(session = %id, open, "Session opened");

        SessionStream {
            id,
            receiver,
            table: Arc::clone(self),
        }
    }

    /// Looks up a live session.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.lock().get(id).cloned()
    }

    /// Removes a session. Returns whether it was present.
    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    /// Drops every session, which ends their event streams.
    pub fn close_all(&self) {
        let closed = {
            let mut sessions = self.lock();
            let closed = sessions.len();
            sessions.clear();
            closed
        };
        if closed > 0 {
            info!(closed, "Closed all sessions");
        }
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Event stream of one session.
///
/// Ends once the session is removed from its table.
#[derive(Debug)]
pub struct SessionStream {
    id: String,
    receiver: mpsc::UnboundedReceiver<Event>,
    table: Arc<SessionTable>,
}

impl SessionStream {
    /// Returns the id of the session this stream belongs to.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.id
    }
}

impl Stream for SessionStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx).map(|event| event.map(Ok))
    }
}

impl Drop for SessionStream {
    fn drop(&mut self) {
        if self.table.remove(&self.id) {
            info!(session = %self.id, "Session closed");
        } else {
            debug!(session = %self.id, "Session stream ended");
        }
    }
}
