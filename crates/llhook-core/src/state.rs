//! Pressed-key tracking across keyboard callbacks.

use crate::keymap::key::Key;

/// Ordered set of keys currently held down, oldest first.
///
/// A key appears at most once. Keyboard auto-repeat delivers a stream of
/// key-down messages for a held key; only the first one adds it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressedKeys {
    keys: Vec<Key>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` as held down. Returns `false` if it already was.
    pub fn press(&mut self, key: Key) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Records `key` as released. Returns `false` if it was not held down,
    /// which happens for keys pressed before the hook was installed.
    pub fn release(&mut self, key: Key) -> bool {
        match self.keys.iter().position(|&held| held == key) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[Key] {
        &self.keys
    }

    /// Copies the current contents for embedding in an event.
    pub fn snapshot(&self) -> Vec<Key> {
        self.keys.clone()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_a_down_b_up_a_leaves_only_b() {
        // Arrange
        let mut pressed = PressedKeys::new();

        // Act
        pressed.press(Key::A);
        pressed.press(Key::B);
        pressed.release(Key::A);

        // Assert
        assert_eq!(pressed.as_slice(), &[Key::B]);
    }

    #[test]
    fn test_press_keeps_insertion_order() {
        let mut pressed = PressedKeys::new();
        pressed.press(Key::LeftControl);
        pressed.press(Key::LeftShift);
        pressed.press(Key::S);
        assert_eq!(pressed.as_slice(), &[Key::LeftControl, Key::LeftShift, Key::S]);
    }

    #[test]
    fn test_auto_repeat_does_not_duplicate_key() {
        // Arrange
        let mut pressed = PressedKeys::new();

        // Act
        assert!(pressed.press(Key::A));
        assert!(!pressed.press(Key::A));
        assert!(!pressed.press(Key::A));

        // Assert – a single release clears the key
        assert_eq!(pressed.as_slice(), &[Key::A]);
        pressed.release(Key::A);
        assert!(pressed.as_slice().is_empty());
    }

    #[test]
    fn test_release_of_absent_key_is_ignored() {
        let mut pressed = PressedKeys::new();
        pressed.press(Key::B);

        assert!(!pressed.release(Key::A));
        assert_eq!(pressed.as_slice(), &[Key::B]);
    }

    #[test]
    fn test_snapshot_is_independent_of_later_changes() {
        // Arrange
        let mut pressed = PressedKeys::new();
        pressed.press(Key::A);
        let snapshot = pressed.snapshot();

        // Act
        pressed.press(Key::B);
        pressed.release(Key::A);

        // Assert
        assert_eq!(snapshot, vec![Key::A]);
        assert_eq!(pressed.as_slice(), &[Key::B]);
    }

    #[test]
    fn test_unknown_keys_with_different_codes_are_tracked_separately() {
        let mut pressed = PressedKeys::new();
        pressed.press(Key::Unknown(0xE8));
        pressed.press(Key::Unknown(0xE9));
        pressed.release(Key::Unknown(0xE8));
        assert_eq!(pressed.as_slice(), &[Key::Unknown(0xE9)]);
    }

    #[test]
    fn test_clear_empties_the_set() {
        let mut pressed = PressedKeys::new();
        pressed.press(Key::A);
        pressed.clear();
        assert!(pressed.as_slice().is_empty());
    }
}
