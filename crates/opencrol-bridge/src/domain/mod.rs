//! Domain layer for opencrol-bridge.
//!
//! Pure business-logic types with no dependencies on I/O, networking, or
//! external frameworks: the JSON "language" spoken between card and bridge,
//! and the runtime configuration structure.

pub mod config;
pub mod messages;

// Re-export the most commonly needed types at the domain module boundary
// so callers can write `domain::BridgeConfig` instead of the longer path.
pub use config::{load_tuning, BridgeConfig, ConfigError};
pub use messages::{BridgeToCardMsg, CardToBridgeMsg};
