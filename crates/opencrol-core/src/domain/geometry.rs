//! Display-to-remote coordinate mapping.
//!
//! In absolute mode the input surface shows a live image of the remote
//! screen.  The surface is laid out at some on-screen size (the *rect*,
//! display pixels) while the image itself has fixed *natural* dimensions
//! (remote pixels).  Mapping a pointer position means translating it into
//! the rect's local space and scaling by the natural/rect ratio.
//!
//! The mapping is deliberately a free function over two small value types:
//! there is nothing to own and nothing to mutate.

use serde::{Deserialize, Serialize};

/// On-screen bounding rectangle of the input surface, in display pixels.
///
/// `width`/`height` can legitimately be zero while the surface is not yet
/// laid out or the stream image has not loaded; mapping refuses to produce
/// coordinates in that window rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    /// Whether the rect has positive area and can be mapped against.
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Natural pixel dimensions of the remote screen image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

/// Maps a pointer position in display coordinates to integer remote pixels.
///
/// ```text
/// x_remote = round((x - rect.left) * natural.width  / rect.width)
/// y_remote = round((y - rect.top)  * natural.height / rect.height)
/// ```
///
/// Returns `None` when the rect has a zero or negative dimension, so callers
/// suppress the command instead of emitting NaN or infinite coordinates.
pub fn map_to_remote(
    rect: &SurfaceRect,
    natural: NaturalSize,
    x_display: f64,
    y_display: f64,
) -> Option<(i32, i32)> {
    if !rect.is_ready() {
        return None;
    }
    let x = (x_display - rect.left) * f64::from(natural.width) / rect.width;
    let y = (y_display - rect.top) * f64::from(natural.height) / rect.height;
    Some((x.round() as i32, y.round() as i32))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> SurfaceRect {
        SurfaceRect {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn test_identity_when_rect_matches_natural() {
        // Arrange: surface displayed at its natural size, origin at (0, 0)
        let r = rect(0.0, 0.0, 1920.0, 1080.0);
        let n = NaturalSize {
            width: 1920,
            height: 1080,
        };

        // Act / Assert: output equals the input offset exactly
        assert_eq!(map_to_remote(&r, n, 0.0, 0.0), Some((0, 0)));
        assert_eq!(map_to_remote(&r, n, 960.0, 540.0), Some((960, 540)));
        assert_eq!(map_to_remote(&r, n, 1919.0, 1079.0), Some((1919, 1079)));
    }

    #[test]
    fn test_scales_linearly_with_natural_over_rect_ratio() {
        // Surface shown at half size: every display pixel is two remote pixels.
        let r = rect(0.0, 0.0, 960.0, 540.0);
        let n = NaturalSize {
            width: 1920,
            height: 1080,
        };

        assert_eq!(map_to_remote(&r, n, 100.0, 50.0), Some((200, 100)));
        assert_eq!(map_to_remote(&r, n, 480.0, 270.0), Some((960, 540)));
    }

    #[test]
    fn test_subtracts_rect_origin() {
        // The surface is offset on screen; the offset must not leak into
        // remote coordinates.
        let r = rect(100.0, 50.0, 1920.0, 1080.0);
        let n = NaturalSize {
            width: 1920,
            height: 1080,
        };

        assert_eq!(map_to_remote(&r, n, 100.0, 50.0), Some((0, 0)));
        assert_eq!(map_to_remote(&r, n, 1060.0, 590.0), Some((960, 540)));
    }

    #[test]
    fn test_rounds_to_nearest_remote_pixel() {
        let r = rect(0.0, 0.0, 1000.0, 1000.0);
        let n = NaturalSize {
            width: 1500,
            height: 1500,
        };

        // 333 * 1.5 = 499.5 → rounds to 500
        assert_eq!(map_to_remote(&r, n, 333.0, 0.0), Some((500, 0)));
    }

    #[test]
    fn test_zero_width_rect_yields_none() {
        // Surface not laid out yet: must refuse, not divide by zero.
        let r = rect(0.0, 0.0, 0.0, 1080.0);
        let n = NaturalSize {
            width: 1920,
            height: 1080,
        };

        assert_eq!(map_to_remote(&r, n, 100.0, 100.0), None);
    }

    #[test]
    fn test_zero_height_rect_yields_none() {
        let r = rect(0.0, 0.0, 1920.0, 0.0);
        let n = NaturalSize {
            width: 1920,
            height: 1080,
        };

        assert_eq!(map_to_remote(&r, n, 100.0, 100.0), None);
    }

    #[test]
    fn test_negative_dimension_rect_yields_none() {
        let r = rect(0.0, 0.0, -5.0, 1080.0);
        let n = NaturalSize {
            width: 1920,
            height: 1080,
        };

        assert_eq!(map_to_remote(&r, n, 100.0, 100.0), None);
    }

    #[test]
    fn test_is_ready_reflects_dimensions() {
        assert!(rect(0.0, 0.0, 1.0, 1.0).is_ready());
        assert!(!rect(0.0, 0.0, 0.0, 1.0).is_ready());
        assert!(!rect(0.0, 0.0, 1.0, 0.0).is_ready());
    }
}
