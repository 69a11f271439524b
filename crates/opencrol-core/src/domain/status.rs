//! Typed view of the desktop agent's status report.
//!
//! The agent exposes a single status endpoint describing everything the card
//! renders: monitors, audio sessions, output devices, capture state.  The
//! bridge polls it and pushes the decoded struct to connected cards.

use serde::{Deserialize, Serialize};

/// One physical monitor attached to the remote machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorInfo {
    pub index: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub primary: bool,
}

/// An application with an active audio session on the remote machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioApp {
    pub process_id: u32,
    pub name: String,
    pub volume: f64,
}

/// An audio output device on the remote machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioDevice {
    pub device_id: String,
    pub name: String,
    #[serde(default)]
    pub default: bool,
}

/// The agent's full status report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub online: bool,
    pub current_monitor: u32,
    pub master_volume: f64,
    pub capture_active: bool,
    #[serde(default)]
    pub monitors: Vec<MonitorInfo>,
    #[serde(default)]
    pub audio_apps: Vec<AudioApp>,
    #[serde(default)]
    pub audio_devices: Vec<AudioDevice>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
