//! The outbound command vocabulary.
//!
//! Every instruction the bridge can send to the desktop agent is one variant
//! of [`Command`].  The vocabulary is closed: the agent exposes a fixed set
//! of services, and representing them as an enum makes an unknown command a
//! compile-time impossibility rather than a runtime typo.
//!
//! Commands are immutable once built.  Constructors that take user-influenced
//! values (volume levels, key strings, free text) validate their payload and
//! return a [`CommandError`] instead of producing a command the agent would
//! reject.
//!
//! # Serde representation
//!
//! ```json
//! {"kind":"click","button":"left","x":960,"y":540}
//! {"kind":"move_mouse","x":12,"y":-3,"relative":true}
//! {"kind":"set_volume","volume":0.55}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for command construction.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("volume {0} is outside 0.0..=1.0")]
    VolumeOutOfRange(f64),
    #[error("empty key string")]
    EmptyKeys,
    #[error("empty or whitespace-only text")]
    EmptyText,
    #[error("empty device identifier")]
    EmptyDeviceId,
}

/// Mouse button identifier, serialized lowercase to match the agent API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One outbound instruction to the desktop agent.
///
/// Produced by the translation engines, dispatched exactly once, never
/// mutated.  The translator holds no command queue or history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// Press-and-release of a mouse button, optionally at an absolute
    /// remote position.  Coordinate-free clicks act at the current cursor.
    Click {
        button: MouseButton,
        #[serde(skip_serializing_if = "Option::is_none")]
        x: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        y: Option<i32>,
    },

    /// Cursor movement.  `relative: false` carries absolute remote pixels;
    /// `relative: true` carries deltas.
    MoveMouse { x: i32, y: i32, relative: bool },

    /// Vertical scroll by `delta` wheel units (positive scrolls up).
    Scroll { delta: i32 },

    /// A key press, either a single key name (`"ENTER"`) or a combo string
    /// joined with `+` (`"CTRL+ALT+DEL"`).
    SendKey { keys: String },

    /// Types a literal string on the remote keyboard.
    TypeText { text: String },

    /// Sets the master output volume (0.0 = mute, 1.0 = full).
    SetVolume { volume: f64 },

    /// Sets the volume of a single application's audio session.
    SetAppVolume { process_id: u32, volume: f64 },

    /// Switches the default audio output device.
    SetDefaultDevice { device_id: String },

    /// Routes one application's audio to a specific output device.
    SetAppDevice { process_id: u32, device_id: String },

    /// Selects which monitor the screen stream captures.
    SelectMonitor { monitor_index: u32 },

    /// Starts the agent's screen capture pipeline.
    StartScreenCapture,

    /// Stops the agent's screen capture pipeline.
    StopScreenCapture,

    /// Locks the remote workstation.
    Lock,
}

impl Command {
    /// A left/right/middle click at an absolute remote position.
    pub fn click_at(button: MouseButton, x: i32, y: i32) -> Self {
        Command::Click {
            button,
            x: Some(x),
            y: Some(y),
        }
    }

    /// A click at the current remote cursor position.
    pub fn click(button: MouseButton) -> Self {
        Command::Click {
            button,
            x: None,
            y: None,
        }
    }

    /// An absolute cursor move to remote pixel (x, y).
    pub fn move_absolute(x: i32, y: i32) -> Self {
        Command::MoveMouse {
            x,
            y,
            relative: false,
        }
    }

    /// A relative cursor move by (dx, dy) remote pixels.
    pub fn move_relative(dx: i32, dy: i32) -> Self {
        Command::MoveMouse {
            x: dx,
            y: dy,
            relative: true,
        }
    }

    /// A vertical scroll.
    pub fn scroll(delta: i32) -> Self {
        Command::Scroll { delta }
    }

    /// A key or combo press.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::EmptyKeys`] if `keys` is empty or whitespace.
    pub fn send_key(keys: impl Into<String>) -> Result<Self, CommandError> {
        let keys = keys.into();
        if keys.trim().is_empty() {
            return Err(CommandError::EmptyKeys);
        }
        Ok(Command::SendKey { keys })
    }

    /// A free-text typing command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::EmptyText`] if `text` is empty or contains
    /// only whitespace.  The agent would type nothing visible, so the
    /// command is refused at construction.
    pub fn type_text(text: impl Into<String>) -> Result<Self, CommandError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CommandError::EmptyText);
        }
        Ok(Command::TypeText { text })
    }

    /// A master-volume change.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::VolumeOutOfRange`] unless `volume` is finite
    /// and within `0.0..=1.0`.
    pub fn set_volume(volume: f64) -> Result<Self, CommandError> {
        if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
            return Err(CommandError::VolumeOutOfRange(volume));
        }
        Ok(Command::SetVolume { volume })
    }

    /// A per-application volume change.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::VolumeOutOfRange`] unless `volume` is finite
    /// and within `0.0..=1.0`.
    pub fn set_app_volume(process_id: u32, volume: f64) -> Result<Self, CommandError> {
        if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
            return Err(CommandError::VolumeOutOfRange(volume));
        }
        Ok(Command::SetAppVolume { process_id, volume })
    }

    /// Switches the default audio output device.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::EmptyDeviceId`] for an empty identifier.
    pub fn set_default_device(device_id: impl Into<String>) -> Result<Self, CommandError> {
        let device_id = device_id.into();
        if device_id.trim().is_empty() {
            return Err(CommandError::EmptyDeviceId);
        }
        Ok(Command::SetDefaultDevice { device_id })
    }

    /// Routes an application's audio to a specific output device.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::EmptyDeviceId`] for an empty identifier.
    pub fn set_app_device(
        process_id: u32,
        device_id: impl Into<String>,
    ) -> Result<Self, CommandError> {
        let device_id = device_id.into();
        if device_id.trim().is_empty() {
            return Err(CommandError::EmptyDeviceId);
        }
        Ok(Command::SetAppDevice {
            process_id,
            device_id,
        })
    }

    /// The backend service identifier for this command kind.
    ///
    /// Used for routing (the HTTP client keys its endpoint table on this)
    /// and for log lines that must not expose payload values.
    pub fn service_name(&self) -> &'static str {
        match self {
            Command::Click { .. } => "click",
            Command::MoveMouse { .. } => "move_mouse",
            Command::Scroll { .. } => "scroll",
            Command::SendKey { .. } => "send_key",
            Command::TypeText { .. } => "type_text",
            Command::SetVolume { .. } => "set_volume",
            Command::SetAppVolume { .. } => "set_app_volume",
            Command::SetDefaultDevice { .. } => "set_default_device",
            Command::SetAppDevice { .. } => "set_app_device",
            Command::SelectMonitor { .. } => "select_monitor",
            Command::StartScreenCapture => "start_screen_capture",
            Command::StopScreenCapture => "stop_screen_capture",
            Command::Lock => "lock",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
