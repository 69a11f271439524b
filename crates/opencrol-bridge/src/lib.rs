//! opencrol-bridge library crate.
//!
//! This crate connects the dashboard remote-control card to the OpenCtrol
//! desktop agent.  The card captures raw pointer and keyboard interactions
//! and sends them over WebSocket as JSON; the bridge feeds them through the
//! translation engines in `opencrol-core` and dispatches the resulting
//! commands to the agent's REST API.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Dashboard card (JSON over WebSocket)
//!         ↕
//! [opencrol-bridge]
//!   ├── domain/           Pure types: card message enums, BridgeConfig
//!   ├── application/      TranslateSession: card events → commands → dispatch
//!   └── infrastructure/
//!         ├── ws_server/     WebSocket accept loop (tokio-tungstenite)
//!         └── agent_client/  HTTP client for the agent's REST API (reqwest)
//!         ↕
//! OpenCtrol desktop agent (REST, /api/v1/...)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies (no I/O, no async, no frameworks).
//! - `application` depends on `domain` and `opencrol-core`, plus the
//!   `CommandDispatcher` trait it defines for infrastructure to implement.
//! - `infrastructure` depends on all other layers plus `tokio`, `reqwest`,
//!   and `tungstenite`.

/// Domain layer: pure business-logic types (no I/O).
pub mod domain;

/// Application layer: per-session translation and dispatch orchestration.
pub mod application;

/// Infrastructure layer: WebSocket server and agent HTTP client.
pub mod infrastructure;
