use crate::coords::Vec2;

/// A triangle position in normalized device coordinates.
///
/// Immutable once created; removed only by clearing the whole list.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a point, clamping both coordinates into `[-1, 1]`.
    ///
    /// Clicks on the canvas edge can land a hair outside the range after the
    /// float conversion.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Point {
    #[inline]
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Whether anything is on the canvas.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CanvasState {
    /// No triangles. Initial state.
    Empty,
    /// At least one triangle.
    Populated,
}

/// Ordered triangle positions, in placement order.
///
/// Append-only; the only removal is a bulk [`clear`](Self::clear).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TriangleList {
    points: Vec<Point>,
}

impl TriangleList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point at the end of the list.
    #[inline]
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Removes every point. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn state(&self) -> CanvasState {
        if self.points.is_empty() {
            CanvasState::Empty
        } else {
            CanvasState::Populated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let list = TriangleList::new();
        assert!(list.is_empty());
        assert_eq!(list.state(), CanvasState::Empty);
    }

    #[test]
    fn push_keeps_placement_order() {
        let mut list = TriangleList::new();
        list.push(Point::new(0.1, 0.2));
        list.push(Point::new(-0.3, 0.4));

        assert_eq!(list.len(), 2);
        assert_eq!(list.state(), CanvasState::Populated);
        assert_eq!(list.points()[0], Point::new(0.1, 0.2));
        assert_eq!(list.last(), Some(Point::new(-0.3, 0.4)));
    }

    #[test]
    fn clear_returns_to_empty_from_any_state() {
        let mut list = TriangleList::new();
        list.clear();
        assert_eq!(list.state(), CanvasState::Empty);

        for i in 0..5 {
            list.push(Point::new(i as f32 * 0.1, 0.0));
        }
        list.clear();
        assert_eq!(list.state(), CanvasState::Empty);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn point_is_clamped_to_ndc_range() {
        let p = Point::new(1.000_001, -3.0);
        assert_eq!((p.x(), p.y()), (1.0, -1.0));
    }
}
