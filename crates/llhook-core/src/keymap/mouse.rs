//! Low-level mouse message translation.
//!
//! A `WH_MOUSE_LL` callback receives the window message identifier in
//! `wParam` and an `MSLLHOOKSTRUCT` in `lParam`. The message says what
//! happened; for wheel and X-button messages the high word of `mouseData`
//! says by how much, or which button.

use crate::event::{ButtonAction, MouseButton};

pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_XBUTTONDOWN: u32 = 0x020B;
pub const WM_XBUTTONUP: u32 = 0x020C;
pub const WM_MOUSEHWHEEL: u32 = 0x020E;

/// `XBUTTON1` as found in the high word of `mouseData`.
pub const XBUTTON1: u16 = 0x0001;

/// What a raw mouse message means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseInput {
    /// Pointer motion with no button change.
    Move,
    Button {
        button: MouseButton,
        action: ButtonAction,
    },
    Wheel {
        button: MouseButton,
        delta: i16,
    },
}

/// Translates a low-level mouse message.
///
/// Returns `None` for messages a low-level hook is not expected to deliver
/// (double-click and non-client messages).
pub fn mouse_input(message: u32, mouse_data: u32) -> Option<MouseInput> {
    let high_word = (mouse_data >> 16) as u16;
    let button = |button, action| Some(MouseInput::Button { button, action });

    match message {
        WM_MOUSEMOVE => Some(MouseInput::Move),
        WM_LBUTTONDOWN => button(MouseButton::Left, ButtonAction::Down),
        WM_LBUTTONUP => button(MouseButton::Left, ButtonAction::Up),
        WM_RBUTTONDOWN => button(MouseButton::Right, ButtonAction::Down),
        WM_RBUTTONUP => button(MouseButton::Right, ButtonAction::Up),
        WM_MBUTTONDOWN => button(MouseButton::Middle, ButtonAction::Down),
        WM_MBUTTONUP => button(MouseButton::Middle, ButtonAction::Up),
        WM_XBUTTONDOWN => button(x_button(high_word), ButtonAction::Down),
        WM_XBUTTONUP => button(x_button(high_word), ButtonAction::Up),
        WM_MOUSEWHEEL => Some(MouseInput::Wheel {
            button: MouseButton::Wheel,
            delta: high_word as i16,
        }),
        WM_MOUSEHWHEEL => Some(MouseInput::Wheel {
            button: MouseButton::HWheel,
            delta: high_word as i16,
        }),
        _ => None,
    }
}

fn x_button(high_word: u16) -> MouseButton {
    if high_word == XBUTTON1 {
        MouseButton::X1
    } else {
        MouseButton::X2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_message_translates_to_move_marker() {
        assert_eq!(mouse_input(WM_MOUSEMOVE, 0), Some(MouseInput::Move));
    }

    #[test]
    fn test_standard_buttons_translate_with_direction() {
        let cases = [
            (WM_LBUTTONDOWN, MouseButton::Left, ButtonAction::Down),
            (WM_LBUTTONUP, MouseButton::Left, ButtonAction::Up),
            (WM_RBUTTONDOWN, MouseButton::Right, ButtonAction::Down),
            (WM_RBUTTONUP, MouseButton::Right, ButtonAction::Up),
            (WM_MBUTTONDOWN, MouseButton::Middle, ButtonAction::Down),
            (WM_MBUTTONUP, MouseButton::Middle, ButtonAction::Up),
        ];
        for (message, button, action) in cases {
            assert_eq!(
                mouse_input(message, 0),
                Some(MouseInput::Button { button, action }),
                "message 0x{message:04X}"
            );
        }
    }

    #[test]
    fn test_x_buttons_are_told_apart_by_mouse_data_high_word() {
        assert_eq!(
            mouse_input(WM_XBUTTONDOWN, 0x0001_0000),
            Some(MouseInput::Button { button: MouseButton::X1, action: ButtonAction::Down })
        );
        assert_eq!(
            mouse_input(WM_XBUTTONUP, 0x0002_0000),
            Some(MouseInput::Button { button: MouseButton::X2, action: ButtonAction::Up })
        );
    }

    #[test]
    fn test_wheel_delta_is_signed_high_word() {
        // Arrange: one notch toward the user is -120 (0xFF88)
        let toward_user = 0xFF88_0000u32;

        // Act / Assert
        assert_eq!(
            mouse_input(WM_MOUSEWHEEL, toward_user),
            Some(MouseInput::Wheel { button: MouseButton::Wheel, delta: -120 })
        );
        assert_eq!(
            mouse_input(WM_MOUSEHWHEEL, 120 << 16),
            Some(MouseInput::Wheel { button: MouseButton::HWheel, delta: 120 })
        );
    }

    #[test]
    fn test_unexpected_messages_are_not_translated() {
        // WM_LBUTTONDBLCLK and WM_NCMOUSEMOVE never reach a low-level hook
        assert_eq!(mouse_input(0x0203, 0), None);
        assert_eq!(mouse_input(0x00A0, 0), None);
    }
}
