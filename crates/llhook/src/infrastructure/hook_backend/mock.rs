//! Scripted hook backend for unit and integration testing.
//!
//! Tests queue raw hook callbacks (and quit/failure signals) up front; each
//! [`HookBackend::next_message`] call pops one entry and, like Windows,
//! delivers it to the sink only if a hook for that device is installed.
//! Every OS-facing call is recorded for later assertions.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use llhook_core::keymap::{mouse, WM_KEYDOWN, WM_KEYUP};

use super::{
    BackendError, Device, HookArgs, HookBackend, HookSink, KeyboardPayload, MousePayload,
    PumpStatus, HC_ACTION,
};

/// Handle type issued by [`MockBackend`].
pub type MockHandle = u32;

/// One scripted step of the message pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockMessage {
    Keyboard(HookArgs, KeyboardPayload),
    Mouse(HookArgs, MousePayload),
    /// A message that is not input; dispatching it runs no hook callback.
    Idle,
    Quit,
    Fail(String),
}

/// A recorded [`HookBackend::call_next`] invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardedCall {
    pub handle: Option<MockHandle>,
    pub args: HookArgs,
}

#[derive(Debug)]
struct MockState {
    script: VecDeque<MockMessage>,
    next_handle: MockHandle,
    next_result: isize,
    active: Vec<(MockHandle, Device)>,
    registered: Vec<Device>,
    unregistered: Vec<MockHandle>,
    forwarded: Vec<ForwardedCall>,
    refused: Vec<Device>,
}

/// A mock implementation of [`HookBackend`].
///
/// Clones share one script and one call record, so a test can keep a clone
/// to inspect the calls a `Hook` made after it has been dropped.
///
/// When the script runs out, `next_message` reports [`PumpStatus::Quit`] so a
/// test's dispatch loop always terminates.
#[derive(Debug, Clone)]
pub struct MockBackend {
    state: Rc<RefCell<MockState>>,
}

impl MockBackend {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState {
                script: VecDeque::new(),
                next_handle: 1,
                next_result: 0,
                active: Vec::new(),
                registered: Vec::new(),
                unregistered: Vec::new(),
                forwarded: Vec::new(),
                refused: Vec::new(),
            })),
        }
    }

    /// Appends a step to the script.
    pub fn push(&self, message: MockMessage) {
        self.state.borrow_mut().script.push_back(message);
    }

    /// Makes the next registrations for `device` fail.
    pub fn refuse(&self, device: Device) {
        self.state.borrow_mut().refused.push(device);
    }

    /// Sets the value every forwarded call returns, standing in for whatever
    /// the rest of the hook chain decides.
    pub fn set_next_result(&self, result: isize) {
        self.state.borrow_mut().next_result = result;
    }

    /// Devices passed to `register`, successful or not, in call order.
    pub fn registered(&self) -> Vec<Device> {
        self.state.borrow().registered.clone()
    }

    /// Handles passed to `unregister`, in call order.
    pub fn unregistered(&self) -> Vec<MockHandle> {
        self.state.borrow().unregistered.clone()
    }

    /// Every `call_next` invocation, in call order.
    pub fn forwarded(&self) -> Vec<ForwardedCall> {
        self.state.borrow().forwarded.clone()
    }

    /// Handle currently installed for `device`, if any.
    pub fn active_handle(&self, device: Device) -> Option<MockHandle> {
        self.state
            .borrow()
            .active
            .iter()
            .find(|(_, d)| *d == device)
            .map(|(handle, _)| *handle)
    }

    /// Number of script steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.state.borrow().script.len()
    }

    fn is_active(&self, device: Device) -> bool {
        self.active_handle(device).is_some()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HookBackend for MockBackend {
    type Handle = MockHandle;

    fn register(&self, device: Device) -> Result<MockHandle, BackendError> {
        let mut state = self.state.borrow_mut();
        state.registered.push(device);
        if state.refused.contains(&device) {
            return Err(BackendError::HookRefused(format!(
                "mock refused {device} hook"
            )));
        }
        let handle = state.next_handle;
        state.next_handle += 1;
        state.active.push((handle, device));
        Ok(handle)
    }

    fn call_next(&self, handle: Option<MockHandle>, args: HookArgs) -> isize {
        let mut state = self.state.borrow_mut();
        state.forwarded.push(ForwardedCall { handle, args });
        state.next_result
    }

    fn unregister(&self, handle: MockHandle) -> Result<(), BackendError> {
        let mut state = self.state.borrow_mut();
        state.unregistered.push(handle);
        match state.active.iter().position(|(h, _)| *h == handle) {
            Some(index) => {
                state.active.remove(index);
                Ok(())
            }
            None => Err(BackendError::UnhookFailed(format!(
                "mock handle {handle} is not installed"
            ))),
        }
    }

    fn next_message(&self, sink: &mut dyn HookSink) -> PumpStatus {
        // Release the borrow before calling into the sink, which calls back
        // into `call_next`.
        let message = self.state.borrow_mut().script.pop_front();
        match message {
            None | Some(MockMessage::Quit) => PumpStatus::Quit,
            Some(MockMessage::Fail(reason)) => PumpStatus::Failed(reason),
            Some(MockMessage::Idle) => PumpStatus::Dispatched,
            Some(MockMessage::Keyboard(args, payload)) => {
                if self.is_active(Device::Keyboard) {
                    sink.on_keyboard(args, payload);
                }
                PumpStatus::Dispatched
            }
            Some(MockMessage::Mouse(args, payload)) => {
                if self.is_active(Device::Mouse) {
                    sink.on_mouse(args, payload);
                }
                PumpStatus::Dispatched
            }
        }
    }
}

// ── Script builders ──────────────────────────────────────────────────────────

/// Fake `lParam` value; the mock never dereferences it.
const FAKE_L_PARAM: isize = 0x1000;

/// A keyboard callback for `message` on Virtual-Key `vk`.
pub fn keyboard_message(message: u32, vk: u32) -> MockMessage {
    MockMessage::Keyboard(
        HookArgs {
            n_code: HC_ACTION,
            w_param: message as usize,
            l_param: FAKE_L_PARAM,
        },
        KeyboardPayload {
            vk_code: vk,
            ..KeyboardPayload::default()
        },
    )
}

/// A `WM_KEYDOWN` callback for `vk`.
pub fn key_down(vk: u32) -> MockMessage {
    keyboard_message(WM_KEYDOWN, vk)
}

/// A `WM_KEYUP` callback for `vk`.
pub fn key_up(vk: u32) -> MockMessage {
    keyboard_message(WM_KEYUP, vk)
}

/// A mouse callback for `message` at (`x`, `y`).
pub fn mouse_message(message: u32, x: i32, y: i32, mouse_data: u32) -> MockMessage {
    MockMessage::Mouse(
        HookArgs {
            n_code: HC_ACTION,
            w_param: message as usize,
            l_param: FAKE_L_PARAM,
        },
        MousePayload {
            x,
            y,
            mouse_data,
            ..MousePayload::default()
        },
    )
}

/// A `WM_MOUSEMOVE` callback.
pub fn mouse_move(x: i32, y: i32) -> MockMessage {
    mouse_message(mouse::WM_MOUSEMOVE, x, y, 0)
}

/// A vertical wheel callback turning by `delta`.
pub fn mouse_wheel(delta: i16, x: i32, y: i32) -> MockMessage {
    mouse_message(mouse::WM_MOUSEWHEEL, x, y, u32::from(delta as u16) << 16)
}
