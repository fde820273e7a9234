//! Code translation tables for low-level hook payloads.
//!
//! Raw hook data arrives as Windows numbers: a Virtual-Key code and a window
//! message for the keyboard, a window message plus `mouseData` for the mouse.
//! Everything here turns those numbers into the semantic values of
//! [`crate::event`]. The tables are total: no input makes them fail.

pub mod key;
pub mod mouse;
pub mod windows_vk;

pub use key::Key;
pub use mouse::MouseInput;

use crate::event::KeyAction;

pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;

/// Unified access to all translation directions used by the hook engine.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a Virtual-Key code to a [`Key`].
    ///
    /// Returns [`Key::Unknown`] if no mapping exists for `vk`.
    pub fn key(vk: u32) -> Key {
        windows_vk::vk_to_key(vk)
    }

    /// Translates a low-level keyboard message to its direction.
    ///
    /// `WM_SYSKEY*` messages (keys pressed while Alt is held, and F10) count
    /// as ordinary transitions. Returns `None` for any other message.
    pub fn key_action(message: u32) -> Option<KeyAction> {
        match message {
            WM_KEYDOWN | WM_SYSKEYDOWN => Some(KeyAction::Down),
            WM_KEYUP | WM_SYSKEYUP => Some(KeyAction::Up),
            _ => None,
        }
    }

    /// Translates a low-level mouse message, see [`mouse::mouse_input`].
    pub fn mouse_input(message: u32, mouse_data: u32) -> Option<MouseInput> {
        mouse::mouse_input(message, mouse_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_messages_translate_to_direction() {
        assert_eq!(KeyMapper::key_action(WM_KEYDOWN), Some(KeyAction::Down));
        assert_eq!(KeyMapper::key_action(WM_KEYUP), Some(KeyAction::Up));
    }

    #[test]
    fn test_sys_key_messages_translate_like_plain_ones() {
        assert_eq!(KeyMapper::key_action(WM_SYSKEYDOWN), Some(KeyAction::Down));
        assert_eq!(KeyMapper::key_action(WM_SYSKEYUP), Some(KeyAction::Up));
    }

    #[test]
    fn test_other_messages_have_no_direction() {
        assert_eq!(KeyMapper::key_action(0x0102), None); // WM_CHAR
        assert_eq!(KeyMapper::key_action(0), None);
    }

    #[test]
    fn test_mapper_key_delegates_to_vk_table() {
        assert_eq!(KeyMapper::key(0x41), Key::A);
        assert_eq!(KeyMapper::key(0x07), Key::Unknown(0x07));
    }
}
