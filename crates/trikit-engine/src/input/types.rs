use crate::coords::Viewport;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Pointer move event in logical pixels, relative to the canvas' top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event.
///
/// Carries the pointer position at the time of the press/release, in logical
/// pixels relative to the canvas' top-left corner, and the canvas size that
/// position refers to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    /// Canvas size when the event was delivered.
    pub canvas: Viewport,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        state: KeyState,
        /// Text the key produces under the current layout (e.g. `"x"`), if any.
        text: Option<String>,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,
}

impl InputEvent {
    /// Discrete presses/releases may change what is drawn; motion never does.
    pub fn is_discrete(&self) -> bool {
        matches!(self, InputEvent::Key { .. } | InputEvent::PointerButton(_))
    }
}
