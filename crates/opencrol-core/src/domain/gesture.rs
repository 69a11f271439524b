//! Tap/drag/scroll classification for a single input surface.
//!
//! The [`GestureEngine`] consumes a stream of pointer samples for one card
//! surface and decides, per contact lifecycle, whether the user tapped
//! (one `click`), dragged (a series of `move_mouse`), or scrolled.  Every
//! timing decision uses the timestamp carried on the sample, never the wall
//! clock, so identical input streams always classify identically.
//!
//! # State machine, per contact
//!
//! ```text
//! Idle ──pointer_down──▶ Down ──qualifying move──▶ Dragging
//!   ▲                      │                          │
//!   └──────pointer_up / pointer_cancel / mode switch──┘
//! ```
//!
//! A contact is the span from pointer-down to pointer-up.  Release from
//! `Down` with small displacement and (for touch) a short duration is a tap;
//! anything else ends silently.  Wheel input and the context-menu trigger
//! bypass the machine entirely.
//!
//! # Mode-specific movement
//!
//! - Absolute mode emits mapped remote coordinates, throttled to one command
//!   per `move_throttle_ms` via a last-emitted-timestamp guard.
//! - Relative mode emits sensitivity-scaled deltas.  Samples sharing one
//!   timestamp (browsers batch pointer events per animation frame) coalesce
//!   into a single accumulated delta, flushed when a later sample arrives or
//!   the contact ends.

use serde::{Deserialize, Serialize};

use crate::command::{Command, MouseButton};
use crate::domain::geometry::{map_to_remote, SurfaceRect};
use crate::domain::surface::{StreamSignal, SurfaceMode};
use crate::tuning::Tuning;

/// The input device class that produced a sample.
///
/// Touch taps are validated by displacement and duration; mouse taps by the
/// absence of any emitted drag movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// One observed pointer event in surface display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Event timestamp in milliseconds.  Must be monotonic per session.
    pub ts_ms: u64,
    pub x: f64,
    pub y: f64,
    pub source: PointerSource,
}

/// In-flight state for one contact.  Created on down, consumed on up.
#[derive(Debug, Clone, Copy)]
struct Contact {
    origin: (f64, f64),
    last: (f64, f64),
    start_ts_ms: u64,
    source: PointerSource,
    /// Whether any qualifying (above-dead-zone) movement occurred.  Set even
    /// when the resulting command was throttled or unmappable.
    moved: bool,
}

/// Per-surface gesture classifier.
///
/// Owns the active [`SurfaceMode`], the current surface rect, and at most
/// one in-flight contact.  Each operation returns the commands to dispatch;
/// the engine itself never performs I/O.
#[derive(Debug)]
pub struct GestureEngine {
    tuning: Tuning,
    mode: SurfaceMode,
    rect: SurfaceRect,
    contact: Option<Contact>,
    /// Timestamp of the last emitted absolute move, for throttling.
    last_abs_move_ts: Option<u64>,
    /// Accumulated relative delta awaiting flush: (dx, dy, sample timestamp).
    pending_rel: Option<(f64, f64, u64)>,
    /// Timestamp and click of the last emitted tap, for double-tap pairing.
    last_tap: Option<(u64, Command)>,
}

impl GestureEngine {
    /// Creates an engine with no stream loaded (relative mode) and an
    /// unready rect.
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            mode: SurfaceMode::default(),
            rect: SurfaceRect {
                left: 0.0,
                top: 0.0,
                width: 0.0,
                height: 0.0,
            },
            contact: None,
            last_abs_move_ts: None,
            pending_rel: None,
            last_tap: None,
        }
    }

    /// The currently active surface mode.
    pub fn mode(&self) -> SurfaceMode {
        self.mode
    }

    /// Updates the surface's on-screen bounding rectangle.
    pub fn set_rect(&mut self, rect: SurfaceRect) {
        self.rect = rect;
    }

    /// Applies a stream load/error signal from the host.
    ///
    /// A mode change discards the in-flight contact and any pending relative
    /// delta: the old mode's coordinate space is gone, so nothing derived
    /// from it may be emitted afterwards.
    pub fn apply_signal(&mut self, signal: StreamSignal) {
        let next = self.mode.on_signal(signal);
        if next != self.mode {
            self.contact = None;
            self.pending_rel = None;
            self.last_abs_move_ts = None;
            // A stored tap click belongs to the old coordinate space.
            self.last_tap = None;
        }
        self.mode = next;
    }

    /// Contact start: Idle → Down.
    ///
    /// A down while another contact is active replaces it; the stale
    /// contact's pending delta is dropped.
    pub fn pointer_down(&mut self, sample: PointerSample) -> Vec<Command> {
        self.pending_rel = None;
        self.contact = Some(Contact {
            origin: (sample.x, sample.y),
            last: (sample.x, sample.y),
            start_ts_ms: sample.ts_ms,
            source: sample.source,
            moved: false,
        });
        Vec::new()
    }

    /// Movement within a contact.
    ///
    /// A move without a preceding down is ignored (malformed contact).
    /// Movement inside the dead zone emits nothing and does not advance the
    /// reference point, so slow jitter accumulates toward the threshold.
    pub fn pointer_move(&mut self, sample: PointerSample) -> Vec<Command> {
        let Some(contact) = self.contact.as_mut() else {
            return Vec::new();
        };

        let dx = sample.x - contact.last.0;
        let dy = sample.y - contact.last.1;
        let dead = self.tuning.drag_dead_zone_px;
        if dx.abs() <= dead && dy.abs() <= dead {
            return Vec::new();
        }

        contact.moved = true;
        contact.last = (sample.x, sample.y);

        match self.mode {
            SurfaceMode::Absolute { natural } => {
                // Rate-limit absolute moves; a suppressed move still counted
                // as drag movement above.
                let throttled = self
                    .last_abs_move_ts
                    .is_some_and(|t| sample.ts_ms.saturating_sub(t) < self.tuning.move_throttle_ms);
                if throttled {
                    return Vec::new();
                }
                match map_to_remote(&self.rect, natural, sample.x, sample.y) {
                    Some((x, y)) => {
                        self.last_abs_move_ts = Some(sample.ts_ms);
                        vec![Command::move_absolute(x, y)]
                    }
                    // Layout unready: suppress, surface no error.
                    None => Vec::new(),
                }
            }
            SurfaceMode::Relative => {
                let sdx = dx * self.tuning.relative_sensitivity;
                let sdy = dy * self.tuning.relative_sensitivity;
                match self.pending_rel {
                    // Same-frame event: coalesce into the pending delta.
                    Some((px, py, pts)) if pts == sample.ts_ms => {
                        self.pending_rel = Some((px + sdx, py + sdy, pts));
                        Vec::new()
                    }
                    // A newer frame arrived: flush the previous frame's
                    // accumulated delta and start accumulating this one.
                    Some(_) => {
                        let flushed = self.flush_pending_rel();
                        self.pending_rel = Some((sdx, sdy, sample.ts_ms));
                        flushed.into_iter().collect()
                    }
                    None => {
                        self.pending_rel = Some((sdx, sdy, sample.ts_ms));
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Contact end: Down/Dragging → Idle.
    ///
    /// Flushes any pending relative delta, then applies the tap test.  A tap
    /// emits one `click{left}`.  A second qualifying tap within the
    /// double-tap window completes a click pair with the first tap's click
    /// (two clicks total for the gesture) and consumes the window.
    pub fn pointer_up(&mut self, sample: PointerSample) -> Vec<Command> {
        let Some(contact) = self.contact.take() else {
            return Vec::new();
        };

        let mut out: Vec<Command> = self.flush_pending_rel().into_iter().collect();

        let is_tap = match contact.source {
            PointerSource::Touch => {
                let ddx = sample.x - contact.origin.0;
                let ddy = sample.y - contact.origin.1;
                let displacement = (ddx * ddx + ddy * ddy).sqrt();
                displacement < self.tuning.tap_slop_px
                    && sample.ts_ms.saturating_sub(contact.start_ts_ms) < self.tuning.tap_max_ms
            }
            PointerSource::Mouse => !contact.moved,
        };
        if !is_tap {
            return out;
        }

        let click = match self.mode {
            SurfaceMode::Absolute { natural } => {
                map_to_remote(&self.rect, natural, sample.x, sample.y)
                    .map(|(x, y)| Command::click_at(MouseButton::Left, x, y))
            }
            SurfaceMode::Relative => Some(Command::click(MouseButton::Left)),
        };
        let Some(click) = click else {
            // Absolute mode with an unready rect: no coordinate, no click.
            return out;
        };

        let click = match self.last_tap.take() {
            Some((t, first_click))
                if sample.ts_ms.saturating_sub(t) < self.tuning.double_tap_window_ms =>
            {
                // Second tap of a pair: the first tap already emitted its
                // click, so this release adds exactly one more, at the
                // first tap's coordinates so drift within the tap slop
                // cannot break the host's double-click rectangle.  The
                // window is consumed so a third tap starts fresh.
                first_click
            }
            _ => {
                self.last_tap = Some((sample.ts_ms, click.clone()));
                click
            }
        };
        out.push(click);
        out
    }

    /// Abandons the in-flight contact silently.  No cleanup command is sent.
    pub fn pointer_cancel(&mut self) {
        self.contact = None;
        self.pending_rel = None;
    }

    /// Context-menu trigger (right-click / long-press).
    ///
    /// Bypasses the tap/drag machine: any active contact is aborted and a
    /// `click{right}` is emitted immediately.
    pub fn context_menu(&mut self, sample: PointerSample) -> Vec<Command> {
        self.contact = None;
        self.pending_rel = None;
        match self.mode {
            SurfaceMode::Absolute { natural } => {
                match map_to_remote(&self.rect, natural, sample.x, sample.y) {
                    Some((x, y)) => vec![Command::click_at(MouseButton::Right, x, y)],
                    None => Vec::new(),
                }
            }
            SurfaceMode::Relative => vec![Command::click(MouseButton::Right)],
        }
    }

    /// Wheel / two-finger-vertical input.  Independent of contact state.
    pub fn wheel(&mut self, delta: i32) -> Vec<Command> {
        vec![Command::scroll(delta)]
    }

    /// Emits the accumulated relative delta, if it rounds to any movement.
    fn flush_pending_rel(&mut self) -> Option<Command> {
        let (dx, dy, _) = self.pending_rel.take()?;
        let (dx, dy) = (dx.round() as i32, dy.round() as i32);
        if dx == 0 && dy == 0 {
            return None;
        }
        Some(Command::move_relative(dx, dy))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::NaturalSize;

    const NATURAL: NaturalSize = NaturalSize {
        width: 1920,
        height: 1080,
    };

    fn touch(ts_ms: u64, x: f64, y: f64) -> PointerSample {
        PointerSample {
            ts_ms,
            x,
            y,
            source: PointerSource::Touch,
        }
    }

    fn mouse(ts_ms: u64, x: f64, y: f64) -> PointerSample {
        PointerSample {
            ts_ms,
            x,
            y,
            source: PointerSource::Mouse,
        }
    }

    fn relative_engine() -> GestureEngine {
        GestureEngine::new(Tuning::default())
    }

    /// Engine in absolute mode with the surface shown at natural size, so
    /// mapped coordinates equal display offsets.
    fn absolute_engine() -> GestureEngine {
        let mut engine = GestureEngine::new(Tuning::default());
        engine.apply_signal(StreamSignal::Loaded { natural: NATURAL });
        engine.set_rect(SurfaceRect {
            left: 0.0,
            top: 0.0,
            width: 1920.0,
            height: 1080.0,
        });
        engine
    }

    // ── Tap classification ────────────────────────────────────────────────────

    #[test]
    fn test_quick_small_touch_contact_is_one_left_click() {
        // Arrange
        let mut engine = relative_engine();

        // Act: 100 ms contact, 3 px total displacement
        engine.pointer_down(touch(1000, 50.0, 50.0));
        let cmds = engine.pointer_up(touch(1100, 52.0, 51.0));

        // Assert: exactly one coordinate-free left click
        assert_eq!(cmds, vec![Command::click(MouseButton::Left)]);
    }

    #[test]
    fn test_tap_in_absolute_mode_clicks_at_mapped_release_point() {
        let mut engine = absolute_engine();
        engine.pointer_down(touch(0, 300.0, 200.0));
        let cmds = engine.pointer_up(touch(80, 301.0, 200.0));

        assert_eq!(cmds, vec![Command::click_at(MouseButton::Left, 301, 200)]);
    }

    #[test]
    fn test_long_touch_contact_is_not_a_tap() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(1000, 50.0, 50.0));
        // 400 ms exceeds the 300 ms tap window.
        let cmds = engine.pointer_up(touch(1400, 50.0, 50.0));
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_touch_displaced_past_slop_is_not_a_tap() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(1000, 50.0, 50.0));
        // 6 px displacement, but no qualifying move event: still not a tap.
        let cmds = engine.pointer_up(touch(1100, 56.0, 50.0));
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_mouse_tap_requires_no_emitted_drag() {
        let mut engine = relative_engine();
        engine.pointer_down(mouse(0, 50.0, 50.0));
        // Sub-dead-zone jitter does not disqualify the tap.
        assert!(engine.pointer_move(mouse(20, 51.0, 50.5)).is_empty());
        let cmds = engine.pointer_up(mouse(40, 51.0, 50.5));

        assert_eq!(cmds, vec![Command::click(MouseButton::Left)]);
    }

    #[test]
    fn test_mouse_drag_release_emits_no_click() {
        let mut engine = relative_engine();
        engine.pointer_down(mouse(0, 50.0, 50.0));
        let moves = engine.pointer_move(mouse(20, 60.0, 50.0));
        // The first qualifying move is pending (frame coalescing), so no
        // command yet, but the contact is now a drag.
        assert!(moves.is_empty());

        let cmds = engine.pointer_up(mouse(400, 60.0, 50.0));
        // The pending delta flushes; no click follows.
        assert_eq!(cmds, vec![Command::move_relative(15, 0)]);
    }

    #[test]
    fn test_contact_with_real_movement_yields_moves_and_no_click() {
        let mut engine = absolute_engine();
        engine.pointer_down(touch(0, 100.0, 100.0));
        let first = engine.pointer_move(touch(10, 110.0, 100.0));
        let cmds = engine.pointer_up(touch(500, 110.0, 100.0));

        assert_eq!(first, vec![Command::move_absolute(110, 100)]);
        assert!(cmds.is_empty());
    }

    // ── Dead zone ─────────────────────────────────────────────────────────────

    #[test]
    fn test_sub_dead_zone_move_emits_nothing() {
        let mut engine = absolute_engine();
        engine.pointer_down(mouse(0, 100.0, 100.0));
        assert!(engine.pointer_move(mouse(10, 101.5, 101.0)).is_empty());
    }

    #[test]
    fn test_jitter_accumulates_toward_dead_zone_threshold() {
        // Each step is 1.5 px, below the 2 px dead zone, but the reference
        // point does not advance on rejected moves: the second step's delta
        // from the original position is 3 px and qualifies.
        let mut engine = absolute_engine();
        engine.pointer_down(mouse(0, 100.0, 100.0));
        assert!(engine.pointer_move(mouse(100, 101.5, 100.0)).is_empty());
        let cmds = engine.pointer_move(mouse(200, 103.0, 100.0));
        assert_eq!(cmds, vec![Command::move_absolute(103, 100)]);
    }

    // ── Absolute-mode throttling ──────────────────────────────────────────────

    #[test]
    fn test_absolute_moves_within_throttle_window_coalesce_to_one() {
        let mut engine = absolute_engine();
        engine.pointer_down(mouse(0, 100.0, 100.0));

        let first = engine.pointer_move(mouse(10, 110.0, 100.0));
        let second = engine.pointer_move(mouse(20, 120.0, 100.0));

        assert_eq!(first.len(), 1);
        assert!(second.is_empty(), "second move 10 ms later must be throttled");
    }

    #[test]
    fn test_absolute_move_after_throttle_window_emits() {
        let mut engine = absolute_engine();
        engine.pointer_down(mouse(0, 100.0, 100.0));
        engine.pointer_move(mouse(10, 110.0, 100.0));

        let cmds = engine.pointer_move(mouse(70, 120.0, 100.0));
        assert_eq!(cmds, vec![Command::move_absolute(120, 100)]);
    }

    #[test]
    fn test_absolute_move_with_unready_rect_is_suppressed() {
        let mut engine = absolute_engine();
        engine.set_rect(SurfaceRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        });
        engine.pointer_down(mouse(0, 100.0, 100.0));
        assert!(engine.pointer_move(mouse(10, 150.0, 100.0)).is_empty());
        // Release is also coordinate-less, so no click either.
        assert!(engine.pointer_up(mouse(20, 150.0, 100.0)).is_empty());
    }

    // ── Relative mode ─────────────────────────────────────────────────────────

    #[test]
    fn test_relative_deltas_are_scaled_by_sensitivity() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 50.0, 50.0));
        engine.pointer_move(touch(10, 60.0, 54.0)); // Δ(10, 4)
        let cmds = engine.pointer_up(touch(500, 60.0, 54.0));

        // 10 × 1.5 = 15, 4 × 1.5 = 6
        assert_eq!(cmds, vec![Command::move_relative(15, 6)]);
    }

    #[test]
    fn test_relative_moves_with_distinct_timestamps_emit_independently() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 50.0, 50.0));

        let first = engine.pointer_move(touch(10, 60.0, 50.0));
        let second = engine.pointer_move(touch(20, 70.0, 50.0));
        let on_up = engine.pointer_up(touch(500, 70.0, 50.0));

        // First frame's delta flushes when the second frame arrives; the
        // second frame's flushes on release.  No 50 ms throttle applies.
        assert!(first.is_empty());
        assert_eq!(second, vec![Command::move_relative(15, 0)]);
        assert_eq!(on_up, vec![Command::move_relative(15, 0)]);
    }

    #[test]
    fn test_relative_same_frame_moves_coalesce() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 50.0, 50.0));

        // Two events sharing one timestamp (one animation frame).
        assert!(engine.pointer_move(touch(10, 60.0, 50.0)).is_empty());
        assert!(engine.pointer_move(touch(10, 70.0, 50.0)).is_empty());
        let cmds = engine.pointer_up(touch(500, 70.0, 50.0));

        // One command carrying the summed scaled delta: (10 + 10) × 1.5.
        assert_eq!(cmds, vec![Command::move_relative(30, 0)]);
    }

    #[test]
    fn test_cancel_discards_pending_delta() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 50.0, 50.0));
        engine.pointer_move(touch(10, 70.0, 50.0));

        engine.pointer_cancel();
        // Nothing in flight: a stray up emits nothing.
        assert!(engine.pointer_up(touch(20, 70.0, 50.0)).is_empty());
    }

    // ── Mode switching ────────────────────────────────────────────────────────

    #[test]
    fn test_mode_switch_mid_drag_discards_gesture_state() {
        let mut engine = absolute_engine();
        engine.pointer_down(mouse(0, 100.0, 100.0));
        engine.pointer_move(mouse(10, 120.0, 100.0));

        // Stream fails mid-drag: absolute coordinates are meaningless now.
        engine.apply_signal(StreamSignal::Error);

        assert!(engine.pointer_move(mouse(20, 140.0, 100.0)).is_empty());
        assert!(engine.pointer_up(mouse(30, 140.0, 100.0)).is_empty());
        assert_eq!(engine.mode(), SurfaceMode::Relative);
    }

    #[test]
    fn test_same_mode_signal_preserves_contact() {
        // A stream reload at the same resolution is not a mode change.
        let mut engine = absolute_engine();
        engine.pointer_down(mouse(0, 100.0, 100.0));
        engine.apply_signal(StreamSignal::Loaded { natural: NATURAL });

        let cmds = engine.pointer_move(mouse(10, 120.0, 100.0));
        assert_eq!(cmds, vec![Command::move_absolute(120, 100)]);
    }

    // ── Malformed contacts ────────────────────────────────────────────────────

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut engine = relative_engine();
        assert!(engine.pointer_move(touch(10, 60.0, 50.0)).is_empty());
        assert!(engine.pointer_up(touch(20, 60.0, 50.0)).is_empty());
    }

    #[test]
    fn test_second_down_replaces_stale_contact() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 10.0, 10.0));
        // A new down without an intervening up (e.g. missed event).
        engine.pointer_down(touch(1000, 50.0, 50.0));
        let cmds = engine.pointer_up(touch(1100, 51.0, 50.0));

        // Classified against the second contact only: a clean tap.
        assert_eq!(cmds, vec![Command::click(MouseButton::Left)]);
    }

    // ── Right click and wheel ─────────────────────────────────────────────────

    #[test]
    fn test_context_menu_emits_right_click_immediately() {
        let mut engine = absolute_engine();
        let cmds = engine.context_menu(mouse(0, 200.0, 300.0));
        assert_eq!(cmds, vec![Command::click_at(MouseButton::Right, 200, 300)]);
    }

    #[test]
    fn test_context_menu_aborts_active_contact() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 50.0, 50.0));
        let cmds = engine.context_menu(touch(100, 50.0, 50.0));

        assert_eq!(cmds, vec![Command::click(MouseButton::Right)]);
        // The aborted contact must not tap on a stray release.
        assert!(engine.pointer_up(touch(150, 50.0, 50.0)).is_empty());
    }

    #[test]
    fn test_wheel_emits_scroll_regardless_of_contact_state() {
        let mut engine = relative_engine();
        assert_eq!(engine.wheel(-3), vec![Command::scroll(-3)]);

        engine.pointer_down(touch(0, 50.0, 50.0));
        assert_eq!(engine.wheel(5), vec![Command::scroll(5)]);
    }

    // ── Double tap ────────────────────────────────────────────────────────────

    #[test]
    fn test_double_tap_yields_two_clicks_total() {
        // The second tap adds exactly one click to the first tap's click,
        // never a third that the host could read as a triple-click.
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 50.0, 50.0));
        let first = engine.pointer_up(touch(100, 50.0, 50.0));
        engine.pointer_down(touch(250, 50.0, 50.0));
        let second = engine.pointer_up(touch(350, 50.0, 50.0));

        assert_eq!(first, vec![Command::click(MouseButton::Left)]);
        assert_eq!(second, vec![Command::click(MouseButton::Left)]);
    }

    #[test]
    fn test_paired_tap_reuses_first_tap_coordinates() {
        // Drift within the tap slop between the two taps must not move the
        // second click; both have to land inside the host's double-click
        // rectangle.
        let mut engine = absolute_engine();
        engine.pointer_down(touch(0, 100.0, 100.0));
        let first = engine.pointer_up(touch(80, 100.0, 100.0));
        engine.pointer_down(touch(200, 103.0, 103.0));
        let second = engine.pointer_up(touch(280, 103.0, 103.0));

        assert_eq!(first, vec![Command::click_at(MouseButton::Left, 100, 100)]);
        assert_eq!(second, vec![Command::click_at(MouseButton::Left, 100, 100)]);
    }

    #[test]
    fn test_tap_outside_double_window_is_single() {
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 50.0, 50.0));
        engine.pointer_up(touch(100, 50.0, 50.0));
        engine.pointer_down(touch(600, 50.0, 50.0));
        let cmds = engine.pointer_up(touch(700, 50.0, 50.0));

        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn test_third_tap_starts_a_fresh_sequence() {
        // The tap pair consumes the window; a third tap right after the
        // double must not pair with the second tap.  With the window
        // consumed, a fourth tap pairs with the third instead.
        let mut engine = relative_engine();
        engine.pointer_down(touch(0, 50.0, 50.0));
        engine.pointer_up(touch(50, 50.0, 50.0));
        engine.pointer_down(touch(150, 50.0, 50.0));
        engine.pointer_up(touch(200, 50.0, 50.0));

        // Third tap: fresh single, re-arms the window.
        engine.pointer_down(touch(300, 50.0, 50.0));
        assert_eq!(engine.pointer_up(touch(350, 50.0, 50.0)).len(), 1);

        // Fourth tap: pairs with the third, so it is also a single click.
        engine.pointer_down(touch(450, 50.0, 50.0));
        assert_eq!(engine.pointer_up(touch(500, 50.0, 50.0)).len(), 1);
    }
}
