use bitflags::bitflags;

pub use winit::keyboard::KeyCode;

/// Mouse button identifier (decoupled from winit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Extra buttons, numbered from 3.
    Other(u8),
}

impl MouseButton {
    /// This button's bit in a `ButtonMask`.
    pub fn mask(self) -> ButtonMask {
        match self {
            MouseButton::Left => ButtonMask::LEFT,
            MouseButton::Right => ButtonMask::RIGHT,
            MouseButton::Middle => ButtonMask::MIDDLE,
            MouseButton::Other(n) => ButtonMask::from_bits_retain(1 << n.clamp(3, 7)),
        }
    }

    /// Primary and secondary buttons start pointer capture.
    pub fn starts_drag(self) -> bool {
        matches!(self, MouseButton::Left | MouseButton::Right)
    }
}

bitflags! {
    /// Bitmask of currently pressed mouse buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ButtonMask: u8 {
        const LEFT = 1;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
        const BACK = 1 << 3;
        const FORWARD = 1 << 4;
        // Extra buttons past `FORWARD` share the remaining high bits.
        const _ = !0;
    }
}

impl Default for ButtonMask {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Keyboard modifier bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// Press/release state reported by the backend for buttons and keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press,
    Release,
    Repeat,
}

/// A physical key event routed along the focus path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub scancode: u32,
    pub action: Action,
    pub modifiers: Modifiers,
}
