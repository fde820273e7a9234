//! llhook library entry point.
//!
//! Session-wide low-level keyboard and mouse hooks with pressed-key tracking.
//! A [`Hook`] installs the hooks through a
//! [`HookBackend`](infrastructure::hook_backend::HookBackend), translates
//! every callback into an [`InputEvent`] for the application handler, and
//! always passes the original callback on to the next hook.
//!
//! ```no_run
//! # #[cfg(target_os = "windows")]
//! # fn main() -> anyhow::Result<()> {
//! use llhook::infrastructure::hook_backend::windows::WindowsBackend;
//! use llhook::{Hook, HookOptions, InputEvent, Key};
//!
//! let mut hook = Hook::new(WindowsBackend::new());
//! hook.set_handler(|event, control| {
//!     println!("{event}");
//!     if let InputEvent::Keyboard(k) = event {
//!         if k.key == Key::Escape {
//!             control.uninstall_all();
//!         }
//!     }
//!     Ok(())
//! });
//! hook.hook(HookOptions::keyboard_only())?;
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "windows"))]
//! # fn main() {}
//! ```

pub mod application;
pub mod infrastructure;

pub use application::dispatch::LoopExit;
pub use application::engine::{Handler, Hook, HookControl, HookError, HookOptions};
pub use llhook_core::{
    ButtonAction, InputEvent, Key, KeyAction, KeyboardEvent, MouseButton, MouseEvent,
};
