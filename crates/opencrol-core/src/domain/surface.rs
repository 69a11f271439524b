//! The two-state interaction mode machine for the input surface.
//!
//! The card's surface behaves in one of two mutually exclusive ways:
//!
//! - **Absolute** — the surface shows a live remote image with known natural
//!   dimensions, so pointer positions map 1:1 (scaled) to remote pixels.
//! - **Relative** — the stream is unavailable and the surface acts as a
//!   touchpad; only movement deltas are meaningful.
//!
//! The host drives transitions by reporting stream outcomes: a successful
//! image load (with its natural size) enters absolute mode, a load error
//! drops back to relative mode.  Modelling this as an explicit transition
//! function keeps the mode switch observable to the gesture engine, which
//! must discard in-flight gesture state when the coordinate space changes.

use serde::{Deserialize, Serialize};

use super::geometry::NaturalSize;

/// Host-reported outcome of loading the screen stream image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSignal {
    /// The stream image loaded; the surface now maps to remote pixels.
    Loaded { natural: NaturalSize },
    /// The stream failed to load; fall back to touchpad behaviour.
    Error,
}

/// The active interaction mode of the input surface.
///
/// Exactly one mode is active per surface instance at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceMode {
    /// Coordinate-mapped mode against a live remote image.
    Absolute { natural: NaturalSize },
    /// Delta-only touchpad mode.
    Relative,
}

impl SurfaceMode {
    /// Applies a stream signal, returning the mode it selects.
    pub fn on_signal(self, signal: StreamSignal) -> SurfaceMode {
        match signal {
            StreamSignal::Loaded { natural } => SurfaceMode::Absolute { natural },
            StreamSignal::Error => SurfaceMode::Relative,
        }
    }

    /// Whether this is the coordinate-mapped mode.
    pub fn is_absolute(&self) -> bool {
        matches!(self, SurfaceMode::Absolute { .. })
    }
}

impl Default for SurfaceMode {
    /// A freshly created surface has no stream yet, so it starts relative.
    fn default() -> Self {
        SurfaceMode::Relative
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
