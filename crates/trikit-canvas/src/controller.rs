use trikit_engine::coords::{Vec2, Viewport};
use trikit_engine::input::{InputEvent, KeyState, MouseButton, MouseButtonState, PointerButtonEvent};
use trikit_engine::scene::{CanvasState, Point, TriangleList};

/// What an input event did to the canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Outcome {
    /// A triangle was placed at this point.
    Placed(Point),
    /// The canvas was cleared.
    Cleared,
    /// Nothing changed.
    Ignored,
}

/// Owns the triangle list and applies clicks and the clear key to it.
///
/// Empty ⇄ Populated: a left click appends one point, the clear key empties
/// the list. Nothing else mutates it.
#[derive(Debug)]
pub struct TriangleController {
    triangles: TriangleList,
    clear_key: String,
}

impl TriangleController {
    pub fn new(clear_key: char) -> Self {
        Self {
            triangles: TriangleList::new(),
            clear_key: clear_key.to_string(),
        }
    }

    pub fn triangles(&self) -> &TriangleList {
        &self.triangles
    }

    pub fn state(&self) -> CanvasState {
        self.triangles.state()
    }

    /// Applies one input event.
    ///
    /// Clicks are converted against the canvas size carried by the event, so a
    /// resize between the click and the next frame does not move the point.
    pub fn handle(&mut self, event: &InputEvent) -> Outcome {
        match event {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x,
                y,
                canvas,
            }) => self.click(Vec2::new(*x, *y), *canvas),

            InputEvent::Key {
                state: KeyState::Pressed,
                text: Some(text),
                ..
            } if *text == self.clear_key => self.clear(),

            _ => Outcome::Ignored,
        }
    }

    /// Places a triangle at a canvas pixel position.
    pub fn click(&mut self, pos: Vec2, viewport: Viewport) -> Outcome {
        let Some(ndc) = viewport.to_ndc(pos) else {
            log::debug!("click at {pos:?} ignored: canvas has no area");
            return Outcome::Ignored;
        };

        let point = Point::from(ndc);
        self.triangles.push(point);
        log::debug!(
            "triangle #{} at ({:.3}, {:.3})",
            self.triangles.len(),
            point.x(),
            point.y()
        );

        Outcome::Placed(point)
    }

    /// Removes every triangle. Clearing an empty canvas still redraws it.
    pub fn clear(&mut self) -> Outcome {
        let removed = self.triangles.len();
        self.triangles.clear();
        log::debug!("canvas cleared ({removed} triangles removed)");
        Outcome::Cleared
    }
}
