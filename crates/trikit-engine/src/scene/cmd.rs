use crate::coords::Vec2;

use super::Point;

/// Half-width (and half-height) of every placed triangle, in NDC units.
pub const TRIANGLE_HALF_EXTENT: f32 = 0.1;

/// One triangle draw: three vertex positions in NDC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleCmd {
    pub vertices: [[f32; 2]; 3],
}

impl TriangleCmd {
    /// Every triangle is drawn as a non-indexed list of this many vertices.
    pub const VERTEX_COUNT: u32 = 3;

    /// Isosceles triangle centered on `point`: apex above, base below.
    pub fn centered_at(point: Point) -> Self {
        let c = point.to_vec2();
        let h = TRIANGLE_HALF_EXTENT;

        let apex = c + Vec2::new(0.0, h);
        let left = c + Vec2::new(-h, -h);
        let right = c + Vec2::new(h, -h);

        Self {
            vertices: [apex.to_array(), left.to_array(), right.to_array()],
        }
    }

    /// Center of the triangle's bounding box.
    pub fn center(&self) -> Vec2 {
        let [apex, left, right] = self.vertices;
        Vec2::new((left[0] + right[0]) * 0.5, (apex[1] + left[1]) * 0.5)
    }
}

/// Renderer-agnostic draw command stream.
///
/// Only triangles exist today; the enum keeps renderer dispatch stable if
/// other shapes are added.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Triangle(TriangleCmd),
}
