use super::{DrawCmd, TriangleCmd, TriangleList};

/// Recorded draw stream for a frame.
///
/// Items are kept in insertion order, which is also paint order (later items
/// are drawn over earlier ones).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one triangle draw per point, in list order.
    pub fn record(triangles: &TriangleList) -> Self {
        let mut list = Self::new();
        list.rerecord(triangles);
        list
    }

    /// Clears and re-records from `triangles`, reusing the allocation.
    pub fn rerecord(&mut self, triangles: &TriangleList) {
        self.clear();
        self.items.extend(
            triangles
                .points()
                .iter()
                .map(|&p| DrawCmd::Triangle(TriangleCmd::centered_at(p))),
        );
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total vertices submitted when this list is drawn.
    pub fn vertex_count(&self) -> u32 {
        self.items
            .iter()
            .map(|cmd| match cmd {
                DrawCmd::Triangle(_) => TriangleCmd::VERTEX_COUNT,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Point, TRIANGLE_HALF_EXTENT};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn empty_list_records_nothing() {
        let draws = DrawList::record(&TriangleList::new());
        assert!(draws.is_empty());
        assert_eq!(draws.vertex_count(), 0);
    }

    #[test]
    fn triangle_at_origin_has_fixed_shape() {
        let mut tris = TriangleList::new();
        tris.push(Point::new(0.0, 0.0));

        let draws = DrawList::record(&tris);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws.vertex_count(), 3);

        let DrawCmd::Triangle(cmd) = &draws.items()[0];
        assert_eq!(cmd.vertices, [[0.0, 0.1], [-0.1, -0.1], [0.1, -0.1]]);
    }

    #[test]
    fn triangle_is_centered_on_its_point() {
        let cmd = TriangleCmd::centered_at(Point::new(0.5, -0.25));
        let c = cmd.center();
        assert!(close(c.x, 0.5) && close(c.y, -0.25), "{c:?}");

        let [apex, left, right] = cmd.vertices;
        assert!(close(apex[1] - left[1], 2.0 * TRIANGLE_HALF_EXTENT));
        assert!(close(right[0] - left[0], 2.0 * TRIANGLE_HALF_EXTENT));
        assert!(close(left[1], right[1]));
    }

    #[test]
    fn draw_order_follows_list_order() {
        let mut tris = TriangleList::new();
        let pts = [Point::new(-0.5, 0.5), Point::new(0.5, 0.5), Point::new(0.0, -0.5)];
        for p in pts {
            tris.push(p);
        }

        let draws = DrawList::record(&tris);
        for (cmd, p) in draws.items().iter().zip(pts) {
            assert_eq!(cmd, &DrawCmd::Triangle(TriangleCmd::centered_at(p)));
        }
    }

    #[test]
    fn recording_twice_is_identical() {
        let mut tris = TriangleList::new();
        tris.push(Point::new(0.2, 0.3));
        tris.push(Point::new(-0.7, 0.1));

        let first = DrawList::record(&tris);
        let mut second = first.clone();
        second.rerecord(&tris);
        assert_eq!(first, second);
    }

    #[test]
    fn rerecord_after_clear_is_empty() {
        let mut tris = TriangleList::new();
        tris.push(Point::new(0.2, 0.3));
        let mut draws = DrawList::record(&tris);

        tris.clear();
        draws.rerecord(&tris);
        assert!(draws.is_empty());
    }
}
