//! Model Context Protocol (MCP) server implementation.
//!
//! This module exposes the component catalog to AI assistants as MCP tools
//! and resources. Clients connect over HTTP using server-sent events and
//! exchange JSON-RPC 2.0 messages.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          MCP Server                          │
//! │                                                              │
//! │   ┌─────────────┐    ┌─────────────┐    ┌────────────────┐   │
//! │   │    HTTP     │───▶│  Sessions   │───▶│    Handler     │   │
//! │   │  (routes)   │    │ (SSE table) │    │  (lifecycle)   │   │
//! │   └─────────────┘    └─────────────┘    └────────────────┘   │
//! │                                           │          │       │
//! │                                           ▼          ▼       │
//! │                                     ┌─────────┐ ┌──────────┐ │
//! │                                     │  Tools  │ │Resources │ │
//! │                                     └─────────┘ └──────────┘ │
//! │                                           │          │       │
//! │                                           ▼          ▼       │
//! │                                   ┌─────────────────────┐    │
//! │                                   │  ComponentRegistry  │    │
//! │                                   └─────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod handler;
pub mod http;
pub mod protocol;
pub mod resources;
pub mod tools;
pub mod transport;

pub use handler::McpHandler;
pub use http::McpServer;
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use transport::SessionTable;
