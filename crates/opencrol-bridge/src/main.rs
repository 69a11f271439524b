//! OpenCtrol input bridge — entry point.
//!
//! This binary accepts WebSocket connections from dashboard remote-control
//! cards, feeds their raw pointer/keyboard events through the translation
//! engines, and dispatches the resulting commands to the OpenCtrol desktop
//! agent's REST API.  It also polls the agent for status and pushes state
//! updates back to every connected card.
//!
//! # Usage
//!
//! ```text
//! opencrol-bridge [OPTIONS]
//!
//! Options:
//!   --ws-port <PORT>             WebSocket listener port [default: 8732]
//!   --ws-bind <ADDR>             Bind address [default: 0.0.0.0]
//!   --agent-url <URL>            Agent base URL [default: http://127.0.0.1:8711]
//!   --agent-password <PASSWORD>  Agent shared secret (optional)
//!   --status-interval-secs <N>   Status poll interval [default: 10]
//!   --tuning-file <PATH>         TOML file with gesture tuning overrides
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable                   | Default                 |
//! |----------------------------|-------------------------|
//! | `OPENCROL_WS_PORT`         | `8732`                  |
//! | `OPENCROL_WS_BIND`         | `0.0.0.0`               |
//! | `OPENCROL_AGENT_URL`       | `http://127.0.0.1:8711` |
//! | `OPENCROL_AGENT_PASSWORD`  | unset                   |
//! | `OPENCROL_STATUS_INTERVAL` | `10`                    |
//! | `OPENCROL_TUNING_FILE`     | unset                   |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use opencrol_bridge::domain::{load_tuning, BridgeConfig};
use opencrol_bridge::infrastructure::run_server;
use opencrol_core::Tuning;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// OpenCtrol input bridge.
///
/// Accepts WebSocket connections from dashboard cards and translates their
/// raw input events into commands for the OpenCtrol desktop agent.
#[derive(Debug, Parser)]
#[command(
    name = "opencrol-bridge",
    about = "Card-to-agent input translation bridge for OpenCtrol",
    version
)]
struct Cli {
    /// TCP port for the WebSocket server to listen on.
    #[arg(long, default_value_t = 8732, env = "OPENCROL_WS_PORT")]
    ws_port: u16,

    /// IP address to bind the WebSocket server to.
    ///
    /// Use `0.0.0.0` to accept connections from any network interface, or
    /// `127.0.0.1` to accept only local connections.
    #[arg(long, default_value = "0.0.0.0", env = "OPENCROL_WS_BIND")]
    ws_bind: String,

    /// Base URL of the desktop agent's REST API.
    #[arg(
        long,
        default_value = "http://127.0.0.1:8711",
        env = "OPENCROL_AGENT_URL"
    )]
    agent_url: String,

    /// Shared secret for the agent, sent as the `X-Password` header.
    ///
    /// Prefer the environment variable over the CLI flag so the secret does
    /// not appear in the process list.
    #[arg(long, env = "OPENCROL_AGENT_PASSWORD")]
    agent_password: Option<String>,

    /// How often (seconds) to poll the agent status endpoint and push a
    /// state update to connected cards.
    #[arg(long, default_value_t = 10, env = "OPENCROL_STATUS_INTERVAL")]
    status_interval_secs: u64,

    /// Optional TOML file overriding gesture tuning (dead zone, tap window,
    /// touchpad sensitivity, ...).  Missing file means defaults.
    #[arg(long, env = "OPENCROL_TUNING_FILE")]
    tuning_file: Option<PathBuf>,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`BridgeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--ws-bind` is not a valid IP address or the
    /// tuning file exists but cannot be parsed.
    fn into_bridge_config(self) -> anyhow::Result<BridgeConfig> {
        let ws_bind_addr: SocketAddr = format!("{}:{}", self.ws_bind, self.ws_port)
            .parse()
            .with_context(|| {
                format!(
                    "invalid WebSocket bind address: '{}:{}'",
                    self.ws_bind, self.ws_port
                )
            })?;

        let tuning = match &self.tuning_file {
            Some(path) => load_tuning(path)
                .with_context(|| format!("failed to load tuning from {}", path.display()))?,
            None => Tuning::default(),
        };

        Ok(BridgeConfig {
            ws_bind_addr,
            agent_base_url: self.agent_url,
            agent_password: self.agent_password,
            status_interval: Duration::from_secs(self.status_interval_secs),
            tuning,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log level comes from RUST_LOG; fall back to `info`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.into_bridge_config()?;

    info!(
        "OpenCtrol bridge starting — ws={}, agent={}",
        config.ws_bind_addr, config.agent_base_url
    );

    // Graceful shutdown: Ctrl+C clears the flag, the accept loop checks it
    // every 200 ms and exits cleanly.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C — initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    run_server(config, running).await?;

    info!("OpenCtrol bridge stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
