//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! It can be constructed from CLI arguments (preferred for production) or
//! from sensible defaults (useful for local development and tests).
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) makes the bridge easy to embed in tests;
//! `main.rs` is responsible for populating it from CLI args and environment
//! variables.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use opencrol_core::Tuning;

/// All runtime configuration for the bridge.
///
/// Build this struct once at startup and wrap it in an `Arc` so it can be
/// shared cheaply across all session tasks.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// The address and port the WebSocket server binds to.
    ///
    /// `0.0.0.0` accepts connections from any network interface.  Set to
    /// `127.0.0.1` to accept only local connections (e.g. when the dashboard
    /// host proxies the socket).
    pub ws_bind_addr: SocketAddr,

    /// Base URL of the desktop agent's REST API, without a trailing slash
    /// (e.g. `http://192.168.1.50:8711`).
    pub agent_base_url: String,

    /// Shared secret sent as the `X-Password` header on every agent request.
    /// `None` when the agent runs without authentication.
    pub agent_password: Option<String>,

    /// How often to poll the agent status endpoint and push a state update
    /// to connected cards.
    pub status_interval: Duration,

    /// Gesture/chording thresholds, shared by every session.
    pub tuning: Tuning,
}

impl Default for BridgeConfig {
    /// Returns a `BridgeConfig` suitable for local development: bridge and
    /// agent on the same machine, no password, default tuning.
    fn default() -> Self {
        Self {
            // Compile-time-known valid socket address string.
            ws_bind_addr: "0.0.0.0:8732".parse().unwrap(),
            agent_base_url: "http://127.0.0.1:8711".to_string(),
            agent_password: None,
            status_interval: Duration::from_secs(10),
            tuning: Tuning::default(),
        }
    }
}

// ── Tuning file loading ───────────────────────────────────────────────────────

/// Error type for tuning file loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads gesture tuning overrides from a TOML file.
///
/// A missing file is not an error: deployments that are happy with the
/// defaults simply don't ship one.  Any other I/O failure or a malformed
/// document is reported as a [`ConfigError`].
pub fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Tuning::default()),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };
    Ok(toml::from_str(&contents)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
