use super::Vec2;

/// Canvas size in logical pixels.
///
/// This is the coordinate basis for converting pointer positions to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Converts a canvas-relative position (logical px, top-left origin) to NDC.
    ///
    /// The y axis is flipped: pixel row 0 maps to `+1`, row `height` maps to `-1`.
    /// Returns `None` for a degenerate viewport (e.g. minimized window).
    pub fn to_ndc(self, pos: Vec2) -> Option<Vec2> {
        if !self.is_valid() {
            return None;
        }

        let x = pos.x / self.width * 2.0 - 1.0;
        let y = (self.height - pos.y) / self.height * 2.0 - 1.0;
        Some(Vec2::new(x, y))
    }
}
