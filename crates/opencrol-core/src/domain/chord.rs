//! Modifier latching and key-combination composition.
//!
//! An on-screen keyboard has no physical key-hold, so modifier keys latch:
//! tapping CTRL arms it until it is either consumed by the next non-modifier
//! key or tapped again to un-latch.  The engine owns the latched set and the
//! free-text buffer, and produces at most one command per key action.
//!
//! Three key paths exist:
//!
//! - **Toggle modifier** (`CTRL`, `ALT`, `SHIFT`, `WIN`): flips membership
//!   in the latched set, emits nothing.
//! - **Explicit combo** (a dedicated control like "Ctrl+Alt+Del"): emits the
//!   literal combo string as-is and unconditionally clears the latched set.
//! - **Plain key**: emits `[latched in latch order..., key]` joined with `+`
//!   and clears the set.
//!
//! A modifier alone never produces a command.

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// The four latching modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModifierKey {
    Ctrl,
    Alt,
    Shift,
    Win,
}

impl ModifierKey {
    /// The name used inside combo strings (`"CTRL+C"`).
    pub fn combo_name(self) -> &'static str {
        match self {
            ModifierKey::Ctrl => "CTRL",
            ModifierKey::Alt => "ALT",
            ModifierKey::Shift => "SHIFT",
            ModifierKey::Win => "WIN",
        }
    }
}

/// The chording engine: latched modifiers plus the free-text buffer.
///
/// One instance exists per card session; both pieces of state are owned
/// exclusively by it and mutated only from the session's event stream.
#[derive(Debug, Default)]
pub struct ChordEngine {
    /// Latched modifiers in the order they were latched.
    latched: Vec<ModifierKey>,
    /// Accumulated free-text input awaiting submission.
    text_buffer: String,
}

impl ChordEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles a modifier's latch state.  Never emits a command.
    pub fn press_modifier(&mut self, modifier: ModifierKey) {
        if let Some(pos) = self.latched.iter().position(|m| *m == modifier) {
            self.latched.remove(pos);
        } else {
            self.latched.push(modifier);
        }
    }

    /// Presses an explicit combo control.
    ///
    /// The literal string is sent unmodified; separately latched modifiers
    /// are discarded, not merged in.  An empty literal emits nothing (and
    /// still clears the set).
    pub fn press_combo(&mut self, literal: &str) -> Option<Command> {
        self.latched.clear();
        Command::send_key(literal).ok()
    }

    /// Presses a plain (non-modifier, non-combo) key, consuming any latched
    /// modifiers into a combo string.
    pub fn press_key(&mut self, key: &str) -> Option<Command> {
        if key.trim().is_empty() {
            return None;
        }
        let keys = if self.latched.is_empty() {
            key.to_string()
        } else {
            let mut parts: Vec<&str> =
                self.latched.iter().map(|m| m.combo_name()).collect();
            parts.push(key);
            parts.join("+")
        };
        self.latched.clear();
        Command::send_key(keys).ok()
    }

    /// Replaces the free-text buffer with the card's current input value.
    pub fn buffer_text(&mut self, text: &str) {
        self.text_buffer = text.to_string();
    }

    /// Submits the buffered text.
    ///
    /// Emits exactly one `type_text` with the full buffer, then clears it.
    /// An empty or whitespace-only buffer emits nothing and is cleared.
    pub fn submit_text(&mut self) -> Option<Command> {
        let text = std::mem::take(&mut self.text_buffer);
        Command::type_text(text).ok()
    }

    /// The currently latched modifiers, in latch order.
    pub fn latched(&self) -> &[ModifierKey] {
        &self.latched
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
