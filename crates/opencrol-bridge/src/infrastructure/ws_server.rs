//! WebSocket server: accept loop and per-session task management.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming TCP connections from dashboard cards.
//! 3. Upgrading each connection to a WebSocket session.
//! 4. Running two concurrent tasks per session:
//!    - **Card input**: reads JSON frames, parses them into
//!      [`CardToBridgeMsg`], and feeds them through that session's
//!      [`TranslateSession`].
//!    - **Status push**: polls the agent every `status_interval` and sends
//!      a [`BridgeToCardMsg::StateUpdate`] (or `AgentOffline`) frame.
//! 5. Gracefully shutting down when the `running` flag is cleared.
//!
//! Each card session runs in its own Tokio task; the accept loop never
//! blocks on session I/O.  All sessions share one [`AgentClient`], whose
//! connection pool serialises nothing — concurrent dispatches reuse sockets.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{interval, timeout};
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::{CommandDispatcher, TranslateSession};
use crate::domain::config::BridgeConfig;
use crate::domain::messages::{BridgeToCardMsg, CardToBridgeMsg};
use crate::infrastructure::agent_client::AgentClient;

// ── Public API ────────────────────────────────────────────────────────────────

/// Runs the main WebSocket accept loop until `running` is set to `false`.
///
/// Binds a TCP listener on `config.ws_bind_addr` and accepts incoming
/// connections in a loop.  Each accepted connection is handed off to a
/// dedicated Tokio task so that one slow card never blocks others.
///
/// # Errors
///
/// Returns an error if the agent client cannot be constructed (invalid
/// password header) or the TCP listener cannot be bound.
pub async fn run_server(config: BridgeConfig, running: Arc<AtomicBool>) -> anyhow::Result<()> {
    let agent = AgentClient::new(
        config.agent_base_url.clone(),
        config.agent_password.as_deref(),
    )
    .context("failed to build agent HTTP client")?;
    let agent = Arc::new(agent);

    let listener = TcpListener::bind(config.ws_bind_addr)
        .await
        .with_context(|| {
            format!(
                "failed to bind WebSocket listener on {}",
                config.ws_bind_addr
            )
        })?;

    info!("bridge listening on {} for card connections", config.ws_bind_addr);

    let config = Arc::new(config);

    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        // Short timeout on accept() so the loop can periodically check the
        // `running` flag even when no cards are connecting.
        let accept_result = timeout(Duration::from_millis(200), listener.accept()).await;

        match accept_result {
            Ok(Ok((stream, peer_addr))) => {
                info!("new card connection from {peer_addr}");
                let cfg = Arc::clone(&config);
                let agent = Arc::clone(&agent);
                tokio::spawn(async move {
                    handle_card_session(stream, peer_addr, cfg, agent).await;
                });
            }
            Ok(Err(e)) => {
                // Transient accept error (e.g. file descriptor exhaustion).
                // Log and continue rather than crashing the whole bridge.
                error!("accept error: {e}");
            }
            Err(_) => {
                // Timeout — no new connection in the last 200 ms.
            }
        }
    }

    Ok(())
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Top-level handler for a single card WebSocket session.
///
/// Wraps [`run_session`] and logs the outcome, so `run_session` can use `?`
/// for clean error propagation.
async fn handle_card_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    config: Arc<BridgeConfig>,
    agent: Arc<AgentClient>,
) {
    match run_session(raw_stream, peer_addr, config, agent).await {
        Ok(()) => info!("session {peer_addr} closed normally"),
        Err(e) => warn!("session {peer_addr} closed with error: {e:#}"),
    }
}

/// Runs the complete lifecycle of one card session.
///
/// 1. Completes the WebSocket handshake.
/// 2. Builds a [`TranslateSession`] over the shared agent client.
/// 3. Runs the input-reading loop and the status-push loop concurrently.
/// 4. Returns when either finishes (card disconnected or push failed).
async fn run_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    config: Arc<BridgeConfig>,
    agent: Arc<AgentClient>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(raw_stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    // Short random identifier for log lines; the peer address alone repeats
    // across reconnects from the same card.
    let session_id = format!("{peer_addr}/{}", &Uuid::new_v4().to_string()[..8]);
    info!("session {session_id}: established");

    let (ws_tx, mut ws_rx) = ws_stream.split();
    // Shared between the status-push task and (potentially) future outbound
    // paths.  tokio's async-aware Mutex: waiting does not block the thread.
    let ws_tx = Arc::new(tokio::sync::Mutex::new(ws_tx));

    // ── Task A: status push ───────────────────────────────────────────────────
    let ws_tx_push = Arc::clone(&ws_tx);
    let agent_push = Arc::clone(&agent);
    let session_id_push = session_id.clone();
    let status_interval = config.status_interval;

    let mut status_push_task = tokio::spawn(async move {
        let mut ticker = interval(status_interval);
        loop {
            ticker.tick().await;

            let msg = match agent_push.status().await {
                Ok(status) => BridgeToCardMsg::StateUpdate { status },
                Err(e) => {
                    warn!("session {session_id_push}: status poll failed: {e}");
                    BridgeToCardMsg::AgentOffline
                }
            };

            let json = match serde_json::to_string(&msg) {
                Ok(j) => j,
                Err(e) => {
                    error!("session {session_id_push}: state serialization error: {e}");
                    continue;
                }
            };

            let mut sink = ws_tx_push.lock().await;
            if sink.send(WsMessage::Text(json)).await.is_err() {
                debug!("session {session_id_push}: state push failed (card disconnected)");
                break;
            }
        }
    });

    // ── Task B: card input loop ───────────────────────────────────────────────
    let session_id_input = session_id.clone();
    let tuning = config.tuning;

    let mut input_task = tokio::spawn(async move {
        let mut translator = TranslateSession::new(
            tuning,
            agent as Arc<dyn CommandDispatcher>,
            session_id_input.clone(),
        );

        loop {
            let ws_msg = match ws_rx.next().await {
                Some(Ok(msg)) => msg,
                Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                    debug!("session {session_id_input}: card WebSocket closed normally");
                    break;
                }
                Some(Err(e)) => {
                    warn!("session {session_id_input}: card WebSocket error: {e}");
                    break;
                }
                None => {
                    debug!("session {session_id_input}: card stream ended");
                    break;
                }
            };

            match ws_msg {
                WsMessage::Text(json_str) => {
                    let card_msg: CardToBridgeMsg = match serde_json::from_str(&json_str) {
                        Ok(m) => m,
                        Err(e) => {
                            // One bad frame doesn't end the session; the card
                            // keeps sending on the next interaction.
                            warn!("session {session_id_input}: invalid JSON from card: {e}");
                            continue;
                        }
                    };

                    debug!(
                        "session {session_id_input}: card event {}",
                        card_msg_type_name(&card_msg)
                    );
                    translator.handle(card_msg);
                }

                WsMessage::Binary(_) => {
                    // The card protocol is JSON-only.
                    warn!("session {session_id_input}: unexpected binary frame (ignored)");
                }

                WsMessage::Ping(data) => {
                    // tokio-tungstenite replies with Pong automatically when
                    // the sink is written; just log it.
                    debug!("session {session_id_input}: ping ({} bytes)", data.len());
                }

                WsMessage::Pong(_) => {
                    debug!("session {session_id_input}: pong received");
                }

                WsMessage::Close(_) => {
                    debug!("session {session_id_input}: Close frame received");
                    break;
                }

                WsMessage::Frame(_) => {
                    debug!("session {session_id_input}: raw frame (ignored)");
                }
            }
        }
    });

    // Session ends as soon as either side finishes.  Dropping a JoinHandle
    // only detaches the task, so the survivor is aborted explicitly instead
    // of being left to run until its next send fails.
    tokio::select! {
        _ = &mut status_push_task => {
            debug!("session {session_id}: status push task ended");
            input_task.abort();
        }
        _ = &mut input_task => {
            debug!("session {session_id}: input task ended");
            status_push_task.abort();
        }
    }

    Ok(())
}

// ── Helper ────────────────────────────────────────────────────────────────────

/// Returns a short type-name string for a [`CardToBridgeMsg`] variant.
///
/// Used in debug log messages to avoid logging field values (typed text and
/// key presses are user input and must stay out of the logs).
fn card_msg_type_name(msg: &CardToBridgeMsg) -> &'static str {
    match msg {
        CardToBridgeMsg::PointerDown { .. } => "PointerDown",
        CardToBridgeMsg::PointerMove { .. } => "PointerMove",
        CardToBridgeMsg::PointerUp { .. } => "PointerUp",
        CardToBridgeMsg::PointerCancel => "PointerCancel",
        CardToBridgeMsg::ContextMenu { .. } => "ContextMenu",
        CardToBridgeMsg::Wheel { .. } => "Wheel",
        CardToBridgeMsg::SurfaceRect { .. } => "SurfaceRect",
        CardToBridgeMsg::StreamLoaded { .. } => "StreamLoaded",
        CardToBridgeMsg::StreamError => "StreamError",
        CardToBridgeMsg::ModifierToggle { .. } => "ModifierToggle",
        CardToBridgeMsg::ComboPress { .. } => "ComboPress",
        CardToBridgeMsg::KeyPress { .. } => "KeyPress",
        CardToBridgeMsg::TextSubmit { .. } => "TextSubmit",
        CardToBridgeMsg::SetVolume { .. } => "SetVolume",
        CardToBridgeMsg::SetAppVolume { .. } => "SetAppVolume",
        CardToBridgeMsg::SetDefaultDevice { .. } => "SetDefaultDevice",
        CardToBridgeMsg::SetAppDevice { .. } => "SetAppDevice",
        CardToBridgeMsg::SelectMonitor { .. } => "SelectMonitor",
        CardToBridgeMsg::StartCapture => "StartCapture",
        CardToBridgeMsg::StopCapture => "StopCapture",
        CardToBridgeMsg::Lock => "Lock",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
