//! Dispatch loop: the blocking message pump that keeps hooks alive.
//!
//! Low-level hook callbacks are only delivered while the installing thread
//! waits for messages, so [`Hook::run`] blocks that thread until one of:
//!
//! - every device has been uninstalled (normally by the handler through
//!   [`HookControl`](super::engine::HookControl)) → [`LoopExit::Stopped`];
//! - `WM_QUIT` arrives → hooks are removed, [`LoopExit::Quit`];
//! - message retrieval fails → hooks are removed,
//!   [`HookError::MessageLoop`].
//!
//! There is no timeout; absent one of those signals the loop runs forever.

use tracing::{debug, error, info};

use super::engine::{Hook, HookError, HookOptions};
use crate::infrastructure::hook_backend::{HookBackend, PumpStatus};

/// Why the dispatch loop returned normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// No device was left hooked.
    Stopped,
    /// A quit message was received; all hooks have been removed.
    Quit,
}

impl<B: HookBackend> Hook<B> {
    /// Pumps messages until every hook is gone, a quit message arrives, or
    /// message retrieval fails.
    ///
    /// # Errors
    ///
    /// - [`HookError::NotInstalled`] if called with no hook installed.
    /// - [`HookError::MessageLoop`] if the OS fails to deliver a message.
    ///   Hooks have been removed by the time this is returned.
    pub fn run(&mut self) -> Result<LoopExit, HookError> {
        if !self.state.any_active() {
            return Err(HookError::NotInstalled);
        }
        debug!(
            keyboard = self.is_keyboard_active(),
            mouse = self.is_mouse_active(),
            "entering message loop"
        );

        while self.state.any_active() {
            match self.pump_once() {
                PumpStatus::Dispatched => {}
                PumpStatus::Quit => {
                    info!("quit message received, removing hooks");
                    self.uninstall_all();
                    return Ok(LoopExit::Quit);
                }
                PumpStatus::Failed(reason) => {
                    error!(%reason, "message retrieval failed, removing hooks");
                    self.uninstall_all();
                    return Err(HookError::MessageLoop(reason));
                }
            }
        }

        debug!("all hooks removed, leaving message loop");
        Ok(LoopExit::Stopped)
    }

    /// Installs hooks for `options`, then runs the dispatch loop.
    ///
    /// # Errors
    ///
    /// Any error of [`Hook::install`] or [`Hook::run`].
    pub fn hook(&mut self, options: HookOptions) -> Result<LoopExit, HookError> {
        self.install(options)?;
        self.run()
    }

    /// Removes both hooks.
    pub fn uninstall_all(&mut self) {
        self.uninstall_keyboard();
        self.uninstall_mouse();
    }
}
