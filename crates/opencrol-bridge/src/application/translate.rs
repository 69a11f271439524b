//! TranslateSession: turns card messages into dispatched agent commands.
//!
//! One session exists per WebSocket connection.  It owns the gesture and
//! chording engines for that card instance plus the volume-debounce guard,
//! and depends only on the [`CommandDispatcher`] trait — infrastructure
//! implementations speak HTTP, test implementations record calls.
//!
//! # Dispatch semantics
//!
//! Dispatch is fire-and-forget: each command is launched on its own task and
//! the session continues processing input immediately.  A failed dispatch is
//! logged and has no effect on engine state — there is nothing to roll back,
//! because the engines already moved on when the command was produced.
//!
//! The one pacing rule lives here: whenever a batch carries consecutive
//! clicks, the dispatch task sleeps `double_click_gap_ms` between them so
//! the remote host sees two distinct presses, never one merged press.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use opencrol_core::{
    ChordEngine, Command, GestureEngine, PointerSample, StreamSignal, SurfaceRect, Tuning,
};

use crate::domain::messages::CardToBridgeMsg;

/// Trait for delivering a command to the desktop agent.
///
/// Infrastructure implementations use HTTP; test implementations record calls.
#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    /// Delivers one command.  The error string is only ever logged.
    async fn dispatch(&self, command: Command) -> Result<(), String>;
}

/// Per-connection translator: card messages in, dispatched commands out.
pub struct TranslateSession {
    gesture: GestureEngine,
    chord: ChordEngine,
    tuning: Tuning,
    dispatcher: Arc<dyn CommandDispatcher>,
    /// Timestamp of the last dispatched master-volume command.
    last_volume_ts: Option<u64>,
    /// Session label used in log lines.
    session_id: String,
}

impl TranslateSession {
    pub fn new(tuning: Tuning, dispatcher: Arc<dyn CommandDispatcher>, session_id: String) -> Self {
        Self {
            gesture: GestureEngine::new(tuning),
            chord: ChordEngine::new(),
            tuning,
            dispatcher,
            last_volume_ts: None,
            session_id,
        }
    }

    /// Handles one card message: translate, then launch dispatch.
    pub fn handle(&mut self, msg: CardToBridgeMsg) {
        let commands = self.translate(msg);
        if commands.is_empty() {
            return;
        }
        self.launch_dispatch(commands);
    }

    /// Applies a card message to the engines and returns the commands it
    /// produces.  Pure with respect to I/O; all session state lives in the
    /// engines and the debounce guard.
    fn translate(&mut self, msg: CardToBridgeMsg) -> Vec<Command> {
        match msg {
            CardToBridgeMsg::PointerDown { ts_ms, x, y, source } => {
                self.gesture.pointer_down(PointerSample { ts_ms, x, y, source })
            }
            CardToBridgeMsg::PointerMove { ts_ms, x, y, source } => {
                self.gesture.pointer_move(PointerSample { ts_ms, x, y, source })
            }
            CardToBridgeMsg::PointerUp { ts_ms, x, y, source } => {
                self.gesture.pointer_up(PointerSample { ts_ms, x, y, source })
            }
            CardToBridgeMsg::PointerCancel => {
                self.gesture.pointer_cancel();
                Vec::new()
            }
            CardToBridgeMsg::ContextMenu { ts_ms, x, y, source } => {
                self.gesture.context_menu(PointerSample { ts_ms, x, y, source })
            }
            CardToBridgeMsg::Wheel { delta } => self.gesture.wheel(delta),

            CardToBridgeMsg::SurfaceRect {
                left,
                top,
                width,
                height,
            } => {
                self.gesture.set_rect(SurfaceRect {
                    left,
                    top,
                    width,
                    height,
                });
                Vec::new()
            }
            CardToBridgeMsg::StreamLoaded {
                natural_width,
                natural_height,
            } => {
                self.gesture.apply_signal(StreamSignal::Loaded {
                    natural: opencrol_core::NaturalSize {
                        width: natural_width,
                        height: natural_height,
                    },
                });
                Vec::new()
            }
            CardToBridgeMsg::StreamError => {
                self.gesture.apply_signal(StreamSignal::Error);
                Vec::new()
            }

            CardToBridgeMsg::ModifierToggle { modifier } => {
                self.chord.press_modifier(modifier);
                Vec::new()
            }
            CardToBridgeMsg::ComboPress { keys } => {
                self.chord.press_combo(&keys).into_iter().collect()
            }
            CardToBridgeMsg::KeyPress { key } => {
                self.chord.press_key(&key).into_iter().collect()
            }
            CardToBridgeMsg::TextSubmit { text } => {
                self.chord.buffer_text(&text);
                self.chord.submit_text().into_iter().collect()
            }

            CardToBridgeMsg::SetVolume { ts_ms, volume } => {
                // Slider drags fire continuously; debounce to one command per
                // window, keyed by the card's event timestamp.
                let debounced = self
                    .last_volume_ts
                    .is_some_and(|t| ts_ms.saturating_sub(t) < self.tuning.volume_debounce_ms);
                if debounced {
                    return Vec::new();
                }
                match Command::set_volume(volume) {
                    Ok(cmd) => {
                        self.last_volume_ts = Some(ts_ms);
                        vec![cmd]
                    }
                    Err(e) => {
                        warn!("session {}: rejected volume message: {e}", self.session_id);
                        Vec::new()
                    }
                }
            }
            CardToBridgeMsg::SetAppVolume { process_id, volume } => {
                self.checked(Command::set_app_volume(process_id, volume))
            }
            CardToBridgeMsg::SetDefaultDevice { device_id } => {
                self.checked(Command::set_default_device(device_id))
            }
            CardToBridgeMsg::SetAppDevice {
                process_id,
                device_id,
            } => self.checked(Command::set_app_device(process_id, device_id)),

            CardToBridgeMsg::SelectMonitor { monitor_index } => {
                vec![Command::SelectMonitor { monitor_index }]
            }
            CardToBridgeMsg::StartCapture => vec![Command::StartScreenCapture],
            CardToBridgeMsg::StopCapture => vec![Command::StopScreenCapture],
            CardToBridgeMsg::Lock => vec![Command::Lock],
        }
    }

    /// Logs and drops a command the constructors refused.
    fn checked(&self, result: Result<Command, opencrol_core::CommandError>) -> Vec<Command> {
        match result {
            Ok(cmd) => vec![cmd],
            Err(e) => {
                warn!("session {}: rejected card message: {e}", self.session_id);
                Vec::new()
            }
        }
    }

    /// Launches one task that dispatches the commands in order.
    ///
    /// The session does not wait for it: subsequent input processing never
    /// blocks on the network.  Failures are logged and otherwise ignored.
    fn launch_dispatch(&self, commands: Vec<Command>) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let gap = Duration::from_millis(self.tuning.double_click_gap_ms);
        let session_id = self.session_id.clone();
        tokio::spawn(async move {
            let mut previous_was_click = false;
            for command in commands {
                let is_click = matches!(command, Command::Click { .. });
                if is_click && previous_was_click {
                    // Give the remote host time to register two distinct
                    // presses.
                    tokio::time::sleep(gap).await;
                }
                previous_was_click = is_click;

                let name = command.service_name();
                debug!("session {session_id}: dispatching {name}");
                if let Err(e) = dispatcher.dispatch(command).await {
                    warn!("session {session_id}: dispatch of {name} failed: {e}");
                }
            }
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
