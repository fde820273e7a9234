//! OS boundary for low-level input hooks.
//!
//! On Windows, [`windows::WindowsBackend`] registers `WH_KEYBOARD_LL` and
//! `WH_MOUSE_LL` hooks and pumps the thread's message queue. While the pump
//! is blocked in `GetMessageW`, Windows calls the hook procedures on the same
//! thread; they hand the decoded payload to the [`HookSink`] that was passed
//! to [`HookBackend::next_message`].
//!
//! # Hook callback contract
//!
//! A low-level hook callback must return within the system's
//! `LowLevelHooksTimeout` (about 300ms by default, and 1s at most on Windows 7
//! and later). A callback that overruns is skipped, and one that overruns
//! repeatedly is silently removed by the OS. Nothing inside the process is
//! told when that happens.
//!
//! # Testability
//!
//! The [`HookBackend`] trait lets tests script hook callbacks with
//! [`mock::MockBackend`] without a Windows message loop.

use std::fmt;

use thiserror::Error;

pub mod mock;

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod sink_slot;

#[cfg(target_os = "windows")]
pub mod windows;

/// `nCode` value of a callback that carries an input message.
pub const HC_ACTION: i32 = 0;

/// Device class a low-level hook is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Keyboard,
    Mouse,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Device::Keyboard => "keyboard",
            Device::Mouse => "mouse",
        })
    }
}

/// The three arguments of a hook procedure, exactly as the OS passed them.
///
/// They are forwarded to the next hook unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookArgs {
    pub n_code: i32,
    pub w_param: usize,
    pub l_param: isize,
}

impl HookArgs {
    /// Window message identifier carried in `wParam`.
    pub fn message(&self) -> u32 {
        self.w_param as u32
    }
}

/// Fields of a `KBDLLHOOKSTRUCT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardPayload {
    pub vk_code: u32,
    pub scan_code: u32,
    pub flags: u32,
    pub time: u32,
}

/// Fields of an `MSLLHOOKSTRUCT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MousePayload {
    pub x: i32,
    pub y: i32,
    pub mouse_data: u32,
    pub flags: u32,
    pub time: u32,
}

/// Outcome of one message-retrieval step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpStatus {
    /// A message was retrieved and dispatched; hook callbacks may have run.
    Dispatched,
    /// `WM_QUIT` was retrieved.
    Quit,
    /// Message retrieval failed.
    Failed(String),
}

/// Error type for backend operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("the OS refused to install the hook: {0}")]
    HookRefused(String),
    #[error("the OS failed to remove the hook: {0}")]
    UnhookFailed(String),
}

/// Receiver of hook callbacks.
///
/// The return value of each method becomes the hook procedure's `LRESULT`.
pub trait HookSink {
    fn on_keyboard(&mut self, args: HookArgs, payload: KeyboardPayload) -> isize;
    fn on_mouse(&mut self, args: HookArgs, payload: MousePayload) -> isize;
}

/// Trait abstracting the OS hook primitives.
///
/// All methods must be called from the thread that pumps messages; the
/// production implementation is bound to that thread.
pub trait HookBackend {
    /// OS registration handle of one installed hook.
    type Handle: Copy + fmt::Debug;

    /// Installs a session-wide low-level hook for `device`.
    fn register(&self, device: Device) -> Result<Self::Handle, BackendError>;

    /// Passes a callback to the next hook in the chain and returns its result.
    fn call_next(&self, handle: Option<Self::Handle>, args: HookArgs) -> isize;

    /// Removes a hook installed by [`HookBackend::register`].
    fn unregister(&self, handle: Self::Handle) -> Result<(), BackendError>;

    /// Blocks until the next message, dispatching it. Hook callbacks that fire
    /// while blocked are delivered to `sink`.
    fn next_message(&self, sink: &mut dyn HookSink) -> PumpStatus;
}
