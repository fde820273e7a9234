//! Windows low-level keyboard and mouse hook backend.
//!
//! Installs `WH_KEYBOARD_LL` and `WH_MOUSE_LL` hooks for the whole session and
//! pumps the calling thread's message queue. Windows delivers low-level hook
//! callbacks to the installing thread while it waits in `GetMessageW`, so
//! the thread that creates the backend must also be the one that runs the
//! dispatch loop.
//!
//! Hook procedures have no user-data pointer; the sink of the current
//! `next_message` call is reached through the `sink_slot` module.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls. All
//! `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use windows::core::PCWSTR;
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    TranslateMessage, UnhookWindowsHookEx, HHOOK, HOOKPROC, KBDLLHOOKSTRUCT, MSG,
    MSLLHOOKSTRUCT, WH_KEYBOARD_LL, WH_MOUSE_LL, WINDOWS_HOOK_ID, WM_QUIT,
};

use super::sink_slot::{with_active_sink, SinkGuard};
use super::{
    BackendError, Device, HookArgs, HookBackend, HookSink, KeyboardPayload, MousePayload,
    PumpStatus, HC_ACTION,
};

/// Windows low-level hook backend bound to the creating thread.
#[derive(Debug)]
pub struct WindowsBackend {
    thread_id: u32,
}

impl WindowsBackend {
    /// Creates a backend for the current thread, which must run the dispatch loop.
    pub fn new() -> Self {
        // SAFETY: GetCurrentThreadId has no preconditions.
        let thread_id = unsafe { GetCurrentThreadId() };
        Self { thread_id }
    }

    /// Returns a handle other threads can use to stop the dispatch loop.
    pub fn quit_handle(&self) -> QuitHandle {
        QuitHandle {
            thread_id: self.thread_id,
        }
    }
}

impl Default for WindowsBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Posts `WM_QUIT` to a hook thread. Safe to send across threads.
#[derive(Debug, Clone, Copy)]
pub struct QuitHandle {
    thread_id: u32,
}

impl QuitHandle {
    /// Asks the hook thread's dispatch loop to finish.
    pub fn request_quit(&self) -> Result<(), String> {
        // SAFETY: posting a message to a thread id has no memory-safety
        // preconditions; an exited thread only makes the call fail.
        unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
            .map_err(|e| e.to_string())
    }
}

impl HookBackend for WindowsBackend {
    type Handle = HHOOK;

    fn register(&self, device: Device) -> Result<HHOOK, BackendError> {
        let (id, proc): (WINDOWS_HOOK_ID, HOOKPROC) = match device {
            Device::Keyboard => (WH_KEYBOARD_LL, Some(keyboard_hook_proc)),
            Device::Mouse => (WH_MOUSE_LL, Some(mouse_hook_proc)),
        };
        // SAFETY: a null module name returns the handle of the running executable.
        let module = unsafe { GetModuleHandleW(PCWSTR::null()) }
            .map_err(|e| BackendError::HookRefused(e.to_string()))?;
        // SAFETY: the hook procedures are 'static functions with the HOOKPROC
        // signature; thread id 0 installs a session-wide low-level hook.
        unsafe { SetWindowsHookExW(id, proc, Some(module.into()), 0) }
            .map_err(|e| BackendError::HookRefused(e.to_string()))
    }

    fn call_next(&self, handle: Option<HHOOK>, args: HookArgs) -> isize {
        // SAFETY: the arguments are forwarded unmodified from the hook procedure.
        unsafe {
            CallNextHookEx(
                handle,
                args.n_code,
                WPARAM(args.w_param),
                LPARAM(args.l_param),
            )
        }
        .0
    }

    fn unregister(&self, handle: HHOOK) -> Result<(), BackendError> {
        // SAFETY: handle was returned by SetWindowsHookExW and is released once.
        unsafe { UnhookWindowsHookEx(handle) }.map_err(|e| BackendError::UnhookFailed(e.to_string()))
    }

    fn next_message(&self, sink: &mut dyn HookSink) -> PumpStatus {
        let _guard = SinkGuard::publish(sink);
        let mut msg = MSG::default();
        // SAFETY: standard Win32 GetMessage/TranslateMessage/DispatchMessage pattern.
        unsafe {
            match GetMessageW(&mut msg, None, 0, 0).0 {
                -1 => PumpStatus::Failed(std::io::Error::last_os_error().to_string()),
                0 => PumpStatus::Quit,
                _ => {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                    PumpStatus::Dispatched
                }
            }
        }
    }
}

/// Low-level keyboard hook procedure.
///
/// # Safety
///
/// Called by Windows on the hook thread while it waits for messages.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code == HC_ACTION {
        // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
        let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);
        let args = HookArgs {
            n_code,
            w_param: w_param.0,
            l_param: l_param.0,
        };
        let payload = KeyboardPayload {
            vk_code: kbs.vkCode,
            scan_code: kbs.scanCode,
            flags: kbs.flags.0,
            time: kbs.time,
        };
        if let Some(result) = with_active_sink(|sink| sink.on_keyboard(args, payload)) {
            return LRESULT(result);
        }
    }

    // SAFETY: Must call CallNextHookEx when n_code < 0 or nobody is listening.
    CallNextHookEx(None, n_code, w_param, l_param)
}

/// Low-level mouse hook procedure.
///
/// # Safety
///
/// Called by Windows on the hook thread while it waits for messages.
unsafe extern "system" fn mouse_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code == HC_ACTION {
        // SAFETY: l_param points to a MSLLHOOKSTRUCT when n_code == HC_ACTION.
        let mhs = &*(l_param.0 as *const MSLLHOOKSTRUCT);
        let args = HookArgs {
            n_code,
            w_param: w_param.0,
            l_param: l_param.0,
        };
        let payload = MousePayload {
            x: mhs.pt.x,
            y: mhs.pt.y,
            mouse_data: mhs.mouseData,
            flags: mhs.flags,
            time: mhs.time,
        };
        if let Some(result) = with_active_sink(|sink| sink.on_mouse(args, payload)) {
            return LRESULT(result);
        }
    }

    // SAFETY: Must call CallNextHookEx when n_code < 0 or nobody is listening.
    CallNextHookEx(None, n_code, w_param, l_param)
}
