//! ui-docs-mcp: component documentation for AI assistants
//!
//! This library turns a React component library's source tree into a
//! structured JSON catalog and serves that catalog over MCP.
//!
//! # Architecture
//!
//! The work is split into two independent phases:
//!
//! - **Build**: Scan component sources and demo pages, extract JSDoc,
//!   `cva` variant configs, sub-components, examples and props tables,
//!   and write the catalog to disk
//! - **Serve**: Load the catalog once and answer tool calls and resource
//!   reads from any number of concurrent client sessions
//!
//! # Modules
//!
//! - [`config`]: Configuration loading and validation
//! - [`docs`]: Extraction pipeline, catalog model, and registry
//! - [`error`]: Configuration error types
//! - [`mcp`]: MCP protocol implementation and HTTP transport

pub mod config;
pub mod docs;
pub mod error;
pub mod mcp;
