use std::fmt;
use std::path::PathBuf;

/// Keyboard key identifier.
///
/// Only the keys the editor binds are named. Letters and digits are carried as
/// their lowercase character so shortcut tables stay short.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// `a`–`z` and `0`–`9`.
    Char(char),

    /// Any other key, with its stable platform code.
    Unknown(u32),
}

impl Key {
    #[inline]
    pub fn is_char(self, c: char) -> bool {
        self == Key::Char(c.to_ascii_lowercase())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

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

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// The platform shortcut modifier: Ctrl, or Cmd on macOS keyboards.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse wheel delta.
///
/// `Line` is notched-wheel input; `Pixel` is high-precision (touchpads).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical scroll in notches, converting pixel deltas at `line_px` per notch.
    pub fn notches_y(&self, line_px: f32) -> f32 {
        match *self {
            MouseWheelDelta::Line { y, .. } => y,
            MouseWheelDelta::Pixel { y, .. } => y / line_px.max(1.0),
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event with the position and modifiers at press time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    /// Pointer left the window surface.
    PointerLeft,

    Focused(bool),

    /// A file was dropped onto the window.
    FileDropped(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_accepts_ctrl_or_meta() {
        assert!(Modifiers { ctrl: true, ..Default::default() }.command());
        assert!(Modifiers { meta: true, ..Default::default() }.command());
        assert!(!Modifiers { shift: true, ..Default::default() }.command());
    }

    #[test]
    fn is_char_ignores_case() {
        assert!(Key::Char('z').is_char('Z'));
        assert!(!Key::Char('y').is_char('z'));
        assert_eq!(Key::Char('d').to_string(), "D");
    }

    #[test]
    fn pixel_wheel_converts_to_notches() {
        assert_eq!(MouseWheelDelta::Pixel { x: 0.0, y: 100.0 }.notches_y(50.0), 2.0);
        assert_eq!(MouseWheelDelta::Line { x: 0.0, y: -1.0 }.notches_y(50.0), -1.0);
    }
}
