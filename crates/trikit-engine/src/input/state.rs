use super::frame::InputFrame;
use super::types::{InputEvent, PointerButtonEvent, PointerMoveEvent};

/// Current input state for the canvas window.
///
/// winit reports button events without a position, so the last known
/// cursor position is tracked here and attached on translation.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels; `None` until the cursor enters.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Applies an input event to the current state and queues it on `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
            | InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { .. } => {}
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::input::{KeyState, MouseButton, MouseButtonState};

    fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
            canvas: Viewport::new(100.0, 100.0),
        })
    }

    fn key(state: KeyState) -> InputEvent {
        InputEvent::Key {
            state,
            text: Some("x".into()),
        }
    }

    #[test]
    fn button_press_tracks_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, button(MouseButtonState::Pressed, 10.0, 20.0));

        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn pointer_leaving_forgets_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 5.0, y: 6.0 }));
        assert_eq!(state.pointer_pos, Some((5.0, 6.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn events_are_queued_in_arrival_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(KeyState::Pressed));
        state.apply_event(&mut frame, button(MouseButtonState::Pressed, 1.0, 1.0));
        state.apply_event(&mut frame, key(KeyState::Released));

        assert_eq!(frame.events.len(), 3);
        assert!(matches!(frame.events[1], InputEvent::PointerButton(_)));

        frame.clear();
        assert!(frame.events.is_empty());
    }

    #[test]
    fn only_presses_and_releases_are_discrete() {
        assert!(key(KeyState::Pressed).is_discrete());
        assert!(button(MouseButtonState::Released, 0.0, 0.0).is_discrete());
        assert!(!InputEvent::PointerMoved(PointerMoveEvent { x: 0.0, y: 0.0 }).is_discrete());
        assert!(!InputEvent::PointerLeft.is_discrete());
    }
}
