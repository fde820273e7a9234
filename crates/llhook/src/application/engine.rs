//! Hook engine: registration, callback bodies, and teardown.
//!
//! A [`Hook`] owns at most one keyboard and one mouse registration, the
//! pressed-key set, and the application handler. Its lifecycle is
//! `new → install → run (callbacks) → uninstall`; dropping it releases any
//! registration that is still active.
//!
//! # Callback contract
//!
//! Both callback bodies end by forwarding the original arguments to the next
//! hook and returning that result. Translation, state updates, and the
//! handler call run inside `catch_unwind`; a handler that returns an error or
//! panics is logged and the forward still happens. Unwinding out of a hook
//! procedure into the OS would abort the process.
//!
//! The handler runs on the hook thread while the OS waits for the callback to
//! return. It must be quick and must not block; move slow work to another
//! thread. The pressed-key set and the registrations belong to the hook
//! thread and are only reachable through the event snapshot and
//! [`HookControl`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use llhook_core::{
    InputEvent, KeyAction, KeyMapper, KeyboardEvent, MouseEvent, MouseInput, PressedKeys,
};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::infrastructure::hook_backend::{
    BackendError, Device, HookArgs, HookBackend, HookSink, KeyboardPayload, MousePayload,
    PumpStatus, HC_ACTION,
};
use crate::infrastructure::storage::config::HooksConfig;

/// Application callback receiving every translated event.
pub type Handler = Box<dyn FnMut(&InputEvent, &mut HookControl) -> anyhow::Result<()>>;

/// Error type for hook setup and the dispatch loop.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("must hook at least one input device")]
    NoDeviceRequested,
    #[error("hooks are already installed; uninstall them first")]
    AlreadyInstalled,
    #[error("no hook is installed")]
    NotInstalled,
    #[error("failed to install {device} hook: {source}")]
    Registration {
        device: Device,
        #[source]
        source: BackendError,
    },
    #[error("message loop failed: {0}")]
    MessageLoop(String),
}

/// Which device classes to hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookOptions {
    pub keyboard: bool,
    pub mouse: bool,
}

impl HookOptions {
    pub fn keyboard_only() -> Self {
        Self { keyboard: true, mouse: false }
    }

    pub fn mouse_only() -> Self {
        Self { keyboard: false, mouse: true }
    }

    pub fn both() -> Self {
        Self { keyboard: true, mouse: true }
    }
}

impl Default for HookOptions {
    fn default() -> Self {
        Self::keyboard_only()
    }
}

impl From<&HooksConfig> for HookOptions {
    fn from(config: &HooksConfig) -> Self {
        Self {
            keyboard: config.keyboard,
            mouse: config.mouse,
        }
    }
}

/// Requests a handler can make while it runs.
///
/// Uninstall requests take effect right after the current callback has been
/// forwarded; the dispatch loop then exits once no device remains hooked.
#[derive(Debug)]
pub struct HookControl {
    keyboard_active: bool,
    mouse_active: bool,
    release_keyboard: bool,
    release_mouse: bool,
}

impl HookControl {
    fn new(keyboard_active: bool, mouse_active: bool) -> Self {
        Self {
            keyboard_active,
            mouse_active,
            release_keyboard: false,
            release_mouse: false,
        }
    }

    /// Stops listening to the keyboard.
    pub fn uninstall_keyboard(&mut self) {
        self.release_keyboard = true;
    }

    /// Stops listening to the mouse.
    pub fn uninstall_mouse(&mut self) {
        self.release_mouse = true;
    }

    /// Stops listening to both devices, which ends the dispatch loop.
    pub fn uninstall_all(&mut self) {
        self.uninstall_keyboard();
        self.uninstall_mouse();
    }

    /// `true` while the keyboard hook is installed and no uninstall is pending.
    pub fn is_keyboard_active(&self) -> bool {
        self.keyboard_active && !self.release_keyboard
    }

    /// `true` while the mouse hook is installed and no uninstall is pending.
    pub fn is_mouse_active(&self) -> bool {
        self.mouse_active && !self.release_mouse
    }
}

/// Mutable engine state reachable from the callbacks.
pub(crate) struct HookState<H> {
    pub(crate) keyboard: Option<H>,
    pub(crate) mouse: Option<H>,
    pressed: PressedKeys,
    handler: Option<Handler>,
}

impl<H> HookState<H> {
    pub(crate) fn any_active(&self) -> bool {
        self.keyboard.is_some() || self.mouse.is_some()
    }
}

/// Low-level keyboard/mouse hook bound to one [`HookBackend`].
pub struct Hook<B: HookBackend> {
    pub(crate) backend: B,
    pub(crate) state: HookState<B::Handle>,
}

impl<B: HookBackend> Hook<B> {
    /// Creates an engine with no hooks installed and no handler.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: HookState {
                keyboard: None,
                mouse: None,
                pressed: PressedKeys::new(),
                handler: None,
            },
        }
    }

    /// Sets the handler invoked for every keyboard and mouse event.
    pub fn set_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&InputEvent, &mut HookControl) -> anyhow::Result<()> + 'static,
    {
        self.state.handler = Some(Box::new(handler));
    }

    /// Removes the handler; callbacks keep tracking keys and forwarding.
    pub fn clear_handler(&mut self) {
        self.state.handler = None;
    }

    /// Installs low-level hooks for the devices selected in `options`.
    ///
    /// # Errors
    ///
    /// - [`HookError::NoDeviceRequested`] if `options` selects nothing; no
    ///   OS call is made.
    /// - [`HookError::AlreadyInstalled`] if a hook is still active.
    /// - [`HookError::Registration`] if the OS refuses a hook. Hooks
    ///   installed earlier in the same call are removed again.
    pub fn install(&mut self, options: HookOptions) -> Result<(), HookError> {
        if !options.keyboard && !options.mouse {
            return Err(HookError::NoDeviceRequested);
        }
        if self.state.any_active() {
            return Err(HookError::AlreadyInstalled);
        }

        // Keys held before this install were never seen going down.
        self.state.pressed.clear();

        if options.keyboard {
            self.state.keyboard = Some(self.register(Device::Keyboard)?);
        }
        if options.mouse {
            match self.register(Device::Mouse) {
                Ok(handle) => self.state.mouse = Some(handle),
                Err(e) => {
                    self.uninstall_keyboard();
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn register(&self, device: Device) -> Result<B::Handle, HookError> {
        let handle = self
            .backend
            .register(device)
            .map_err(|source| HookError::Registration { device, source })?;
        debug!(%device, ?handle, "low-level hook installed");
        Ok(handle)
    }

    /// Stops listening to the keyboard. Does nothing if it is not hooked.
    pub fn uninstall_keyboard(&mut self) {
        release(&self.backend, &mut self.state.keyboard, Device::Keyboard);
    }

    /// Stops listening to the mouse. Does nothing if it is not hooked.
    pub fn uninstall_mouse(&mut self) {
        release(&self.backend, &mut self.state.mouse, Device::Mouse);
    }

    pub fn is_keyboard_active(&self) -> bool {
        self.state.keyboard.is_some()
    }

    pub fn is_mouse_active(&self) -> bool {
        self.state.mouse.is_some()
    }

    /// Keys currently held down, oldest first.
    pub fn pressed_keys(&self) -> &[llhook_core::Key] {
        self.state.pressed.as_slice()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Callback receiver borrowing this engine.
    #[cfg(test)]
    pub(crate) fn callbacks(&mut self) -> Callbacks<'_, B> {
        Callbacks {
            backend: &self.backend,
            state: &mut self.state,
        }
    }

    /// Retrieves and dispatches one message; hook callbacks run inside.
    pub(crate) fn pump_once(&mut self) -> PumpStatus {
        let mut callbacks = Callbacks {
            backend: &self.backend,
            state: &mut self.state,
        };
        self.backend.next_message(&mut callbacks)
    }
}

impl<B: HookBackend> Drop for Hook<B> {
    fn drop(&mut self) {
        self.uninstall_all();
    }
}

/// Takes the handle out of `slot` and releases it. Best-effort.
fn release<B: HookBackend>(backend: &B, slot: &mut Option<B::Handle>, device: Device) {
    let Some(handle) = slot.take() else {
        return;
    };
    match backend.unregister(handle) {
        Ok(()) => debug!(%device, ?handle, "low-level hook removed"),
        Err(e) => warn!(%device, ?handle, error = %e, "failed to remove low-level hook"),
    }
}

/// The engine as seen from inside a hook callback.
pub(crate) struct Callbacks<'a, B: HookBackend> {
    backend: &'a B,
    state: &'a mut HookState<B::Handle>,
}

impl<B: HookBackend> Callbacks<'_, B> {
    /// Runs `body` with panics contained.
    fn guarded<F>(&mut self, device: Device, body: F) -> Option<HookControl>
    where
        F: FnOnce(&mut HookState<B::Handle>) -> Option<HookControl>,
    {
        let state = &mut *self.state;
        match panic::catch_unwind(AssertUnwindSafe(|| body(state))) {
            Ok(control) => control,
            Err(payload) => {
                warn!(%device, panic = panic_message(payload.as_ref()), "input handler panicked");
                None
            }
        }
    }

    fn apply(&mut self, control: Option<HookControl>) {
        let Some(control) = control else {
            return;
        };
        if control.release_keyboard {
            release(self.backend, &mut self.state.keyboard, Device::Keyboard);
        }
        if control.release_mouse {
            release(self.backend, &mut self.state.mouse, Device::Mouse);
        }
    }
}

impl<B: HookBackend> HookSink for Callbacks<'_, B> {
    fn on_keyboard(&mut self, args: HookArgs, payload: KeyboardPayload) -> isize {
        let control = if args.n_code == HC_ACTION {
            self.guarded(Device::Keyboard, |state| {
                let action = KeyMapper::key_action(args.message())?;
                let key = KeyMapper::key(payload.vk_code);

                match action {
                    KeyAction::Down => {
                        state.pressed.press(key);
                    }
                    KeyAction::Up => {
                        if !state.pressed.release(key) {
                            trace!(%key, "key released without a recorded key-down");
                        }
                    }
                }

                let event = InputEvent::Keyboard(KeyboardEvent {
                    key,
                    action,
                    pressed: state.pressed.snapshot(),
                    raw_code: payload.vk_code,
                });
                Some(invoke_handler(state, &event))
            })
        } else {
            None
        };

        let result = self.backend.call_next(self.state.keyboard, args);
        self.apply(control);
        result
    }

    fn on_mouse(&mut self, args: HookArgs, payload: MousePayload) -> isize {
        let control = if args.n_code == HC_ACTION {
            self.guarded(Device::Mouse, |state| {
                let event = match KeyMapper::mouse_input(args.message(), payload.mouse_data)? {
                    MouseInput::Move => return None,
                    MouseInput::Button { button, action } => MouseEvent {
                        button,
                        action: Some(action),
                        x: payload.x,
                        y: payload.y,
                        wheel_delta: None,
                    },
                    MouseInput::Wheel { button, delta } => MouseEvent {
                        button,
                        action: None,
                        x: payload.x,
                        y: payload.y,
                        wheel_delta: Some(delta),
                    },
                };
                Some(invoke_handler(state, &InputEvent::Mouse(event)))
            })
        } else {
            None
        };

        let result = self.backend.call_next(self.state.mouse, args);
        self.apply(control);
        result
    }
}

/// Calls the handler, if any, and collects its uninstall requests.
fn invoke_handler<H>(state: &mut HookState<H>, event: &InputEvent) -> HookControl {
    let mut control = HookControl::new(state.keyboard.is_some(), state.mouse.is_some());
    if let Some(handler) = state.handler.as_mut() {
        trace!(%event, "dispatching input event");
        if let Err(e) = handler(event, &mut control) {
            warn!(error = %e, "input handler returned an error");
        }
    }
    control
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use llhook_core::{ButtonAction, Key, MouseButton};

    use super::*;
    use crate::infrastructure::hook_backend::mock::{
        key_down, key_up, mouse_message, mouse_move, mouse_wheel, MockBackend, MockMessage,
    };
    use llhook_core::keymap::mouse::{WM_LBUTTONDOWN, WM_RBUTTONUP};

    /// Installs `options` and returns the engine plus a log of handled events.
    fn recording_hook(options: HookOptions) -> (Hook<MockBackend>, Rc<RefCell<Vec<InputEvent>>>) {
        let mut hook = Hook::new(MockBackend::new());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        hook.set_handler(move |event, _| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });
        hook.install(options).expect("install must succeed");
        (hook, events)
    }

    /// Feeds one scripted message through the backend into the engine.
    fn deliver(hook: &mut Hook<MockBackend>, message: MockMessage) {
        hook.backend().push(message);
        assert_eq!(hook.pump_once(), PumpStatus::Dispatched);
    }

    // ── install ───────────────────────────────────────────────────────────────

    #[test]
    fn test_install_without_devices_fails_before_any_registration() {
        // Arrange
        let mut hook = Hook::new(MockBackend::new());

        // Act
        let result = hook.install(HookOptions { keyboard: false, mouse: false });

        // Assert
        assert!(matches!(result, Err(HookError::NoDeviceRequested)));
        assert!(hook.backend().registered().is_empty());
    }

    #[test]
    fn test_no_device_error_message() {
        assert_eq!(
            HookError::NoDeviceRequested.to_string(),
            "must hook at least one input device"
        );
    }

    #[test]
    fn test_install_registers_only_requested_devices() {
        let mut hook = Hook::new(MockBackend::new());

        hook.install(HookOptions::mouse_only()).expect("install");

        assert_eq!(hook.backend().registered(), vec![Device::Mouse]);
        assert!(hook.is_mouse_active());
        assert!(!hook.is_keyboard_active());
    }

    #[test]
    fn test_default_options_hook_keyboard_only() {
        assert_eq!(HookOptions::default(), HookOptions { keyboard: true, mouse: false });
    }

    #[test]
    fn test_hook_options_follow_hooks_config() {
        let config = HooksConfig { keyboard: false, mouse: true };
        assert_eq!(HookOptions::from(&config), HookOptions::mouse_only());
    }

    #[test]
    fn test_install_twice_is_rejected() {
        let mut hook = Hook::new(MockBackend::new());
        hook.install(HookOptions::keyboard_only()).expect("first install");

        let result = hook.install(HookOptions::keyboard_only());

        assert!(matches!(result, Err(HookError::AlreadyInstalled)));
        assert_eq!(hook.backend().registered().len(), 1);
    }

    #[test]
    fn test_registration_failure_is_surfaced_and_rolls_back() {
        // Arrange
        let backend = MockBackend::new();
        backend.refuse(Device::Mouse);
        let mut hook = Hook::new(backend);

        // Act
        let result = hook.install(HookOptions::both());

        // Assert
        assert!(matches!(
            result,
            Err(HookError::Registration { device: Device::Mouse, .. })
        ));
        assert!(!hook.is_keyboard_active(), "keyboard hook must be rolled back");
        assert_eq!(hook.backend().unregistered().len(), 1);
    }

    // ── uninstall ─────────────────────────────────────────────────────────────

    #[test]
    fn test_uninstall_keyboard_twice_releases_once() {
        // Arrange
        let mut hook = Hook::new(MockBackend::new());
        hook.install(HookOptions::keyboard_only()).expect("install");

        // Act
        hook.uninstall_keyboard();
        hook.uninstall_keyboard();

        // Assert
        assert_eq!(hook.backend().unregistered().len(), 1);
        assert!(!hook.is_keyboard_active());
    }

    #[test]
    fn test_uninstall_mouse_when_not_hooked_is_noop() {
        let mut hook = Hook::new(MockBackend::new());
        hook.install(HookOptions::keyboard_only()).expect("install");

        hook.uninstall_mouse();

        assert!(hook.backend().unregistered().is_empty());
    }

    #[test]
    fn test_reinstall_after_uninstall_is_allowed() {
        let mut hook = Hook::new(MockBackend::new());
        hook.install(HookOptions::keyboard_only()).expect("install");
        hook.uninstall_keyboard();

        hook.install(HookOptions::keyboard_only()).expect("reinstall");

        assert!(hook.is_keyboard_active());
    }

    // ── keyboard callback ─────────────────────────────────────────────────────

    #[test]
    fn test_key_down_then_up_produces_events_with_pressed_snapshot() {
        // Arrange
        let (mut hook, events) = recording_hook(HookOptions::keyboard_only());

        // Act
        deliver(&mut hook, key_down(0x41));
        deliver(&mut hook, key_up(0x41));

        // Assert
        let events = events.borrow();
        assert_eq!(
            events[0],
            InputEvent::Keyboard(KeyboardEvent {
                key: Key::A,
                action: KeyAction::Down,
                pressed: vec![Key::A],
                raw_code: 0x41,
            })
        );
        assert_eq!(
            events[1],
            InputEvent::Keyboard(KeyboardEvent {
                key: Key::A,
                action: KeyAction::Up,
                pressed: vec![],
                raw_code: 0x41,
            })
        );
    }

    #[test]
    fn test_down_a_down_b_up_a_leaves_b_pressed() {
        let (mut hook, _events) = recording_hook(HookOptions::keyboard_only());

        deliver(&mut hook, key_down(0x41));
        deliver(&mut hook, key_down(0x42));
        deliver(&mut hook, key_up(0x41));

        assert_eq!(hook.pressed_keys(), &[Key::B]);
    }

    #[test]
    fn test_unmapped_vk_is_reported_as_unknown_key() {
        let (mut hook, events) = recording_hook(HookOptions::keyboard_only());

        deliver(&mut hook, key_down(0xE8));

        let events = events.borrow();
        match &events[0] {
            InputEvent::Keyboard(event) => {
                assert_eq!(event.key, Key::Unknown(0xE8));
                assert_eq!(event.raw_code, 0xE8);
            }
            other => panic!("expected keyboard event, got {other:?}"),
        }
    }

    #[test]
    fn test_key_up_without_key_down_still_produces_event() {
        let (mut hook, events) = recording_hook(HookOptions::keyboard_only());

        deliver(&mut hook, key_up(0x41));

        assert_eq!(events.borrow().len(), 1);
        assert!(hook.pressed_keys().is_empty());
    }

    #[test]
    fn test_keyboard_callback_forwards_original_args_and_returns_chain_result() {
        // Arrange
        let (mut hook, _events) = recording_hook(HookOptions::keyboard_only());
        hook.backend().set_next_result(42);
        let MockMessage::Keyboard(args, payload) = key_down(0x41) else {
            unreachable!("key_down builds a keyboard message")
        };

        // Act
        let result = hook.callbacks().on_keyboard(args, payload);

        // Assert
        assert_eq!(result, 42);
        let forwarded = hook.backend().forwarded();
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].args, args);
        assert_eq!(forwarded[0].handle, hook.backend().active_handle(Device::Keyboard));
    }

    #[test]
    fn test_negative_n_code_is_forwarded_without_processing() {
        let (mut hook, events) = recording_hook(HookOptions::keyboard_only());
        let args = HookArgs { n_code: -1, w_param: 0x100, l_param: 0 };
        let payload = KeyboardPayload { vk_code: 0x41, ..Default::default() };

        hook.callbacks().on_keyboard(args, payload);

        assert!(events.borrow().is_empty());
        assert!(hook.pressed_keys().is_empty());
        assert_eq!(hook.backend().forwarded().len(), 1);
    }

    #[test]
    fn test_handler_error_does_not_prevent_forwarding() {
        // Arrange
        let mut hook = Hook::new(MockBackend::new());
        hook.set_handler(|_, _| anyhow::bail!("handler failed"));
        hook.install(HookOptions::keyboard_only()).expect("install");

        // Act
        deliver(&mut hook, key_down(0x41));

        // Assert
        assert_eq!(hook.backend().forwarded().len(), 1);
        assert_eq!(hook.pressed_keys(), &[Key::A]);
    }

    #[test]
    fn test_handler_panic_does_not_prevent_forwarding() {
        // Arrange
        let mut hook = Hook::new(MockBackend::new());
        hook.set_handler(|_, _| panic!("handler exploded"));
        hook.install(HookOptions::both()).expect("install");

        // Act
        deliver(&mut hook, key_down(0x41));
        deliver(&mut hook, mouse_message(WM_LBUTTONDOWN, 1, 1, 0));

        // Assert
        assert_eq!(hook.backend().forwarded().len(), 2);
    }

    #[test]
    fn test_callbacks_forward_without_handler() {
        let mut hook = Hook::new(MockBackend::new());
        hook.install(HookOptions::both()).expect("install");

        deliver(&mut hook, key_down(0x41));
        deliver(&mut hook, mouse_move(3, 4));

        assert_eq!(hook.backend().forwarded().len(), 2);
        assert_eq!(hook.pressed_keys(), &[Key::A]);
    }

    #[test]
    fn test_handler_can_uninstall_keyboard_after_forward() {
        // Arrange
        let mut hook = Hook::new(MockBackend::new());
        hook.set_handler(|_, control| {
            control.uninstall_keyboard();
            assert!(!control.is_keyboard_active());
            Ok(())
        });
        hook.install(HookOptions::keyboard_only()).expect("install");
        let handle = hook.backend().active_handle(Device::Keyboard);

        // Act
        deliver(&mut hook, key_down(0x41));

        // Assert – forwarded with the live handle, released afterwards
        assert_eq!(hook.backend().forwarded()[0].handle, handle);
        assert!(!hook.is_keyboard_active());
        assert_eq!(hook.backend().unregistered(), vec![handle.expect("handle")]);
    }

    // ── mouse callback ────────────────────────────────────────────────────────

    #[test]
    fn test_mouse_move_never_reaches_handler() {
        // Arrange
        let (mut hook, events) = recording_hook(HookOptions::mouse_only());

        // Act
        deliver(&mut hook, mouse_move(100, 200));

        // Assert
        assert!(events.borrow().is_empty());
        assert_eq!(hook.backend().forwarded().len(), 1);
    }

    #[test]
    fn test_mouse_button_event_carries_position_and_direction() {
        let (mut hook, events) = recording_hook(HookOptions::mouse_only());

        deliver(&mut hook, mouse_message(WM_RBUTTONUP, -15, 640, 0));

        assert_eq!(
            events.borrow()[0],
            InputEvent::Mouse(MouseEvent {
                button: MouseButton::Right,
                action: Some(ButtonAction::Up),
                x: -15,
                y: 640,
                wheel_delta: None,
            })
        );
    }

    #[test]
    fn test_mouse_wheel_event_has_delta_and_no_direction() {
        let (mut hook, events) = recording_hook(HookOptions::mouse_only());

        deliver(&mut hook, mouse_wheel(-240, 5, 5));

        let events = events.borrow();
        match &events[0] {
            InputEvent::Mouse(event) => {
                assert_eq!(event.button, MouseButton::Wheel);
                assert_eq!(event.action, None);
                assert_eq!(event.wheel_delta, Some(-240));
            }
            other => panic!("expected mouse event, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_mouse_message_is_forwarded_only() {
        let (mut hook, events) = recording_hook(HookOptions::mouse_only());

        deliver(&mut hook, mouse_message(0x0203, 0, 0, 0));

        assert!(events.borrow().is_empty());
        assert_eq!(hook.backend().forwarded().len(), 1);
    }

    // ── drop ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_drop_releases_each_active_hook_once() {
        // Arrange
        let backend = MockBackend::new();
        let mut hook = Hook::new(backend.clone());
        hook.install(HookOptions::both()).expect("install");
        let keyboard = backend.active_handle(Device::Keyboard).expect("keyboard");
        let mouse = backend.active_handle(Device::Mouse).expect("mouse");
        hook.uninstall_mouse();

        // Act
        drop(hook);

        // Assert
        assert_eq!(backend.unregistered(), vec![mouse, keyboard]);
    }
}
