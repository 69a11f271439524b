//! Application layer for opencrol-bridge.
//!
//! Orchestrates the business logic: feeds card messages through the
//! translation engines and hands the resulting commands to the dispatcher.
//! It knows *what* to do, but delegates *how* (HTTP, sockets) to the
//! infrastructure layer through the [`CommandDispatcher`] trait.

pub mod translate;

// Re-export so callers can write `application::TranslateSession`.
pub use translate::{CommandDispatcher, TranslateSession};
