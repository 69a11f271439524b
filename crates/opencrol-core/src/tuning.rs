//! Tunable thresholds for the translation engines.
//!
//! The dead zone, tap window, throttle interval, and touchpad sensitivity
//! are behavioural knobs rather than contract values.  They live in one
//! struct with serde defaults so a deployment can override any subset from
//! a TOML file while tests construct exact values inline.

use serde::{Deserialize, Serialize};

/// Behavioural constants for gesture classification and command pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Minimum per-event movement (pixels, either axis) before a contact is
    /// treated as a drag.  Filters sensor jitter.
    #[serde(default = "default_drag_dead_zone_px")]
    pub drag_dead_zone_px: f64,

    /// Maximum total displacement from the contact origin (pixels) for a
    /// touch release to still count as a tap.
    #[serde(default = "default_tap_slop_px")]
    pub tap_slop_px: f64,

    /// Maximum touch contact duration (milliseconds) for a tap.
    #[serde(default = "default_tap_max_ms")]
    pub tap_max_ms: u64,

    /// Two taps closer together than this (milliseconds) form a double-tap.
    #[serde(default = "default_double_tap_window_ms")]
    pub double_tap_window_ms: u64,

    /// Pause between the two clicks of a double-tap (milliseconds).
    #[serde(default = "default_double_click_gap_ms")]
    pub double_click_gap_ms: u64,

    /// Minimum spacing between absolute-mode move commands (milliseconds).
    #[serde(default = "default_move_throttle_ms")]
    pub move_throttle_ms: u64,

    /// Multiplier applied to touchpad deltas before dispatch.
    #[serde(default = "default_relative_sensitivity")]
    pub relative_sensitivity: f64,

    /// Minimum spacing between slider-driven volume commands (milliseconds).
    #[serde(default = "default_volume_debounce_ms")]
    pub volume_debounce_ms: u64,
}

fn default_drag_dead_zone_px() -> f64 {
    2.0
}
fn default_tap_slop_px() -> f64 {
    5.0
}
fn default_tap_max_ms() -> u64 {
    300
}
fn default_double_tap_window_ms() -> u64 {
    300
}
fn default_double_click_gap_ms() -> u64 {
    50
}
fn default_move_throttle_ms() -> u64 {
    50
}
fn default_relative_sensitivity() -> f64 {
    1.5
}
fn default_volume_debounce_ms() -> u64 {
    100
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drag_dead_zone_px: default_drag_dead_zone_px(),
            tap_slop_px: default_tap_slop_px(),
            tap_max_ms: default_tap_max_ms(),
            double_tap_window_ms: default_double_tap_window_ms(),
            double_click_gap_ms: default_double_click_gap_ms(),
            move_throttle_ms: default_move_throttle_ms(),
            relative_sensitivity: default_relative_sensitivity(),
            volume_debounce_ms: default_volume_debounce_ms(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
