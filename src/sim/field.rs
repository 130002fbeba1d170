//! Play-field bounds
//!
//! The field is the canvas rectangle in CSS pixels, origin top-left, y down.

use serde::{Deserialize, Serialize};

use crate::clamp_lenient;
use crate::consts::*;

/// The play-field rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// A field with no measured area has not been laid out yet
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Clamp a pointer x into the range the hook may occupy
    pub fn clamp_hook_x(&self, x: f32) -> f32 {
        clamp_lenient(x, HOOK_EDGE_MARGIN, self.width - HOOK_EDGE_MARGIN)
    }

    /// Hook altitude at the bottom of a cast
    pub fn cast_depth(&self) -> f32 {
        self.height - CAST_DEPTH_MARGIN
    }

    /// Vertical band `(top, span)` fish spawn in
    pub fn spawn_band(&self) -> (f32, f32) {
        let top = WATER_SURFACE + SPAWN_TOP_GAP;
        let span = (self.height - WATER_SURFACE - SPAWN_BOTTOM_GAP).max(0.0);
        (top, span)
    }

    /// True once a shape of `width` is more than two widths past either side
    pub fn has_escaped(&self, x: f32, width: f32) -> bool {
        x < -width * 2.0 || x > self.width + width * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_not_ready() {
        assert!(!PlayField::default().is_ready());
        assert!(!PlayField::new(800.0, 0.0).is_ready());
        assert!(PlayField::new(800.0, 600.0).is_ready());
    }

    #[test]
    fn test_clamp_hook_x() {
        let field = PlayField::new(800.0, 600.0);
        assert_eq!(field.clamp_hook_x(-10.0), 20.0);
        assert_eq!(field.clamp_hook_x(400.0), 400.0);
        assert_eq!(field.clamp_hook_x(10_000.0), 780.0);
    }

    #[test]
    fn test_spawn_band_never_negative() {
        let (top, span) = PlayField::new(300.0, 150.0).spawn_band();
        assert_eq!(top, 140.0);
        assert_eq!(span, 0.0);

        let (_, span) = PlayField::new(800.0, 600.0).spawn_band();
        assert_eq!(span, 400.0);
    }

    #[test]
    fn test_escape_margin() {
        let field = PlayField::new(800.0, 600.0);
        assert!(!field.has_escaped(-70.0, 35.0));
        assert!(field.has_escaped(-70.1, 35.0));
        assert!(!field.has_escaped(870.0, 35.0));
        assert!(field.has_escaped(870.5, 35.0));
    }
}
