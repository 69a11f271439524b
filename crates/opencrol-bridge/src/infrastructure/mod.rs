//! Infrastructure layer for opencrol-bridge.
//!
//! Handles all I/O: accepting WebSocket connections from cards, speaking
//! HTTP to the desktop agent, spawning per-session Tokio tasks, and honoring
//! the graceful shutdown signal.  Protocol translation logic lives in the
//! application layer; message type definitions in the domain layer.

pub mod agent_client;
pub mod ws_server;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use agent_client::{AgentClient, AgentError};
pub use ws_server::run_server;
