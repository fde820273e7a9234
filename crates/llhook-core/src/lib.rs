//! # llhook-core
//!
//! OS-independent building blocks of the `llhook` low-level input hook:
//! the event model, the Windows code translation tables, and the pressed-key
//! tracker. Nothing in this crate calls an OS API, so all of it is testable
//! on any platform.
//!
//! - **`event`** – `KeyboardEvent`, `MouseEvent` and the `InputEvent` union
//!   that application handlers receive.
//!
//! - **`keymap`** – Translation of raw hook data (Virtual-Key codes, window
//!   message identifiers, `mouseData`) into semantic keys, buttons and
//!   directions.
//!
//! - **`state`** – `PressedKeys`, the ordered set of keys currently held down.

pub mod event;
pub mod keymap;
pub mod state;

pub use event::{ButtonAction, InputEvent, KeyAction, KeyboardEvent, MouseButton, MouseEvent};
pub use keymap::{Key, KeyMapper, MouseInput};
pub use state::PressedKeys;
