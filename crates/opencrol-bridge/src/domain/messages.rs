//! JSON message types for the card-facing WebSocket protocol.
//!
//! The dashboard card is a thin view: it captures raw DOM interactions and
//! forwards them as JSON text frames without interpreting them.  All
//! classification (tap vs drag, modifier chording, throttling) happens on
//! this side of the socket, in the translation engines.
//!
//! # Message flow
//!
//! ```text
//! Card   → Bridge:  JSON text frame  →  CardToBridgeMsg  →  Command(s)
//! Bridge → Card:    AgentStatus      →  BridgeToCardMsg  →  JSON text frame
//! ```
//!
//! # JSON discriminant
//!
//! Every message is a JSON object with a `"type"` field that identifies the
//! variant; all other fields are flattened into the same object:
//!
//! ```json
//! {"type":"PointerMove","ts_ms":1200,"x":412.5,"y":300.0,"source":"touch"}
//! ```
//!
//! Serde's `#[serde(tag = "type")]` attribute handles this automatically.
//! Unknown `"type"` values and missing fields fail deserialization; the
//! session logs and skips the frame without closing the connection.
//!
//! # Why separate card→bridge and bridge→card message types?
//!
//! The card *sends* raw interactions; the bridge *sends* agent state.  Two
//! distinct enums make it a compile-time error to push an input event back
//! at the card.

use serde::{Deserialize, Serialize};

use opencrol_core::{AgentStatus, ModifierKey, PointerSource};

// ── Card → Bridge messages ────────────────────────────────────────────────────

/// All messages a card can send to the bridge over WebSocket.
///
/// Pointer events carry the DOM event timestamp (`ts_ms`) so all gesture
/// timing is decided from the card's clock, immune to network jitter.
///
/// # Serde representation
///
/// ```json
/// {"type":"PointerDown","ts_ms":1000,"x":50.0,"y":80.0,"source":"mouse"}
/// {"type":"ComboPress","keys":"CTRL+ALT+DEL"}
/// {"type":"SetVolume","ts_ms":2000,"volume":0.55}
/// {"type":"Lock"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardToBridgeMsg {
    /// Contact start on the input surface.
    PointerDown {
        ts_ms: u64,
        x: f64,
        y: f64,
        source: PointerSource,
    },

    /// Pointer movement within a contact.
    PointerMove {
        ts_ms: u64,
        x: f64,
        y: f64,
        source: PointerSource,
    },

    /// Contact end.
    PointerUp {
        ts_ms: u64,
        x: f64,
        y: f64,
        source: PointerSource,
    },

    /// The contact was taken away from the card (e.g. the browser captured
    /// the pointer elsewhere).  The in-flight gesture is abandoned silently.
    PointerCancel,

    /// Right-click / long-press context-menu trigger.
    ContextMenu {
        ts_ms: u64,
        x: f64,
        y: f64,
        source: PointerSource,
    },

    /// Wheel or two-finger-vertical scroll.
    Wheel { delta: i32 },

    /// The card reports its surface's on-screen bounding rectangle
    /// (sent on layout changes and window resizes).
    SurfaceRect {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },

    /// The screen stream image loaded at the given natural dimensions.
    StreamLoaded {
        natural_width: u32,
        natural_height: u32,
    },

    /// The screen stream failed to load; the surface becomes a touchpad.
    StreamError,

    /// A latching modifier key was tapped on the on-screen keyboard.
    ModifierToggle { modifier: ModifierKey },

    /// A dedicated combo control was pressed ("CTRL+ALT+DEL", "ALT+TAB", ...).
    ComboPress { keys: String },

    /// A plain (non-modifier) key was pressed.
    KeyPress { key: String },

    /// The free-text input was submitted.
    TextSubmit { text: String },

    /// Master volume slider moved.  `ts_ms` drives the debounce window.
    SetVolume { ts_ms: u64, volume: f64 },

    /// Per-application volume row edited.
    SetAppVolume { process_id: u32, volume: f64 },

    /// Default audio output device selected.
    SetDefaultDevice { device_id: String },

    /// An application routed to a specific output device.
    SetAppDevice { process_id: u32, device_id: String },

    /// Monitor picker selection.
    SelectMonitor { monitor_index: u32 },

    /// Screen capture start/stop controls.
    StartCapture,
    StopCapture,

    /// Power button: lock the remote workstation.
    Lock,
}

// ── Bridge → Card messages ────────────────────────────────────────────────────

/// All messages the bridge sends to a card over WebSocket.
///
/// # Serde representation
///
/// ```json
/// {"type":"StateUpdate","status":{"online":true,"current_monitor":0,...}}
/// {"type":"AgentOffline"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeToCardMsg {
    /// A fresh agent status snapshot for the card to render.
    StateUpdate { status: AgentStatus },

    /// The agent could not be reached on the last poll.
    AgentOffline,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
