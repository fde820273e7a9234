//! Semantic input events handed to the application handler.
//!
//! Events are plain immutable values. A [`KeyboardEvent`] carries its own
//! copy of the keys that were held down when it was built, so a handler that
//! keeps an event around never observes later changes to the live set.

use std::fmt;

use serde::Serialize;

use crate::keymap::key::Key;

/// Direction of a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Down,
    Up,
}

/// Direction of a mouse button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Down,
    Up,
}

/// Mouse button (or wheel) involved in a [`MouseEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
    /// Vertical wheel.
    Wheel,
    /// Horizontal (tilt) wheel.
    HWheel,
}

/// A key went down or up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardEvent {
    /// The key that changed state.
    pub key: Key,
    pub action: KeyAction,
    /// Keys held down after this transition was applied, oldest first.
    pub pressed: Vec<Key>,
    /// The Virtual-Key code exactly as the OS reported it.
    pub raw_code: u32,
}

/// A mouse button changed state or a wheel was turned.
///
/// Pointer movement never produces a `MouseEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MouseEvent {
    pub button: MouseButton,
    /// `None` for wheel input, which has no down/up phase.
    pub action: Option<ButtonAction>,
    /// Pointer position in per-monitor-aware screen coordinates.
    pub x: i32,
    pub y: i32,
    /// Wheel rotation in multiples of `WHEEL_DELTA` (120); positive is away
    /// from the user (vertical) or to the right (horizontal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheel_delta: Option<i16>,
}

/// The single argument type an input handler receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "device", rename_all = "snake_case")]
pub enum InputEvent {
    Keyboard(KeyboardEvent),
    Mouse(MouseEvent),
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyAction::Down => "key down",
            KeyAction::Up => "key up",
        })
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ButtonAction::Down => "button down",
            ButtonAction::Up => "button up",
        })
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MouseButton::Left => "LButton",
            MouseButton::Right => "RButton",
            MouseButton::Middle => "MButton",
            MouseButton::X1 => "XButton1",
            MouseButton::X2 => "XButton2",
            MouseButton::Wheel => "Wheel",
            MouseButton::HWheel => "HWheel",
        })
    }
}

impl fmt::Display for KeyboardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [", self.key, self.action)?;
        for (i, key) in self.pressed.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{key}")?;
        }
        write!(f, "] (vk 0x{:02X})", self.raw_code)
    }
}

impl fmt::Display for MouseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.action, self.wheel_delta) {
            (Some(action), _) => write!(f, "{} {action}", self.button)?,
            (None, Some(delta)) => write!(f, "{} {delta:+}", self.button)?,
            (None, None) => write!(f, "{}", self.button)?,
        }
        write!(f, " at ({}, {})", self.x, self.y)
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Keyboard(event) => event.fmt(f),
            InputEvent::Mouse(event) => event.fmt(f),
        }
    }
}

impl From<KeyboardEvent> for InputEvent {
    fn from(event: KeyboardEvent) -> Self {
        InputEvent::Keyboard(event)
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(event: MouseEvent) -> Self {
        InputEvent::Mouse(event)
    }
}
