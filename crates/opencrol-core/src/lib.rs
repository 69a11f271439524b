//! # opencrol-core
//!
//! Shared library for the OpenCtrol input bridge containing the command
//! vocabulary, pointer/keyboard translation engines, and agent status types.
//!
//! This crate is pure domain logic: no I/O, no async, no clocks.  Every
//! timing decision is driven by timestamps carried on the input samples, so
//! the engines are deterministic and fully unit-testable.
//!
//! # Architecture overview
//!
//! The OpenCtrol bridge sits between a dashboard remote-control card (which
//! captures raw pointer and keyboard interactions over a rectangular surface)
//! and a desktop agent (which executes mouse/keyboard/audio commands on the
//! remote machine).  This crate defines the middle:
//!
//! - **`command`** – The closed vocabulary of outbound instructions
//!   (`click`, `move_mouse`, `send_key`, `set_volume`, ...).  Each variant
//!   carries a strongly-typed payload, validated at construction.
//!
//! - **`domain`** – The translation engines.  `GestureEngine` turns a stream
//!   of pointer samples into clicks, drags, and scrolls; `ChordEngine` turns
//!   key presses into combo strings; `geometry` maps display coordinates to
//!   remote pixels; `surface` models the absolute/relative interaction modes.
//!
//! - **`tuning`** – The thresholds and sensitivity factors the engines use,
//!   with sensible defaults and TOML-friendly serde derives.

pub mod command;
pub mod domain;
pub mod tuning;

// Re-export the most-used types at the crate root so callers can write
// `opencrol_core::Command` instead of `opencrol_core::command::Command`.
pub use command::{Command, CommandError, MouseButton};
pub use domain::chord::{ChordEngine, ModifierKey};
pub use domain::geometry::{map_to_remote, NaturalSize, SurfaceRect};
pub use domain::gesture::{GestureEngine, PointerSample, PointerSource};
pub use domain::status::{AgentStatus, AudioApp, AudioDevice, MonitorInfo};
pub use domain::surface::{StreamSignal, SurfaceMode};
pub use tuning::Tuning;
