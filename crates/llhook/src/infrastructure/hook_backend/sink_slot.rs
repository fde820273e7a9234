//! Thread-local slot holding the sink of the `next_message` call in progress.
//!
//! OS hook procedures receive no user-data pointer, so the backend publishes
//! the current [`HookSink`] here for exactly the duration of one
//! `next_message` call. While a callback runs, the sink is taken out of the
//! slot: a nested callback (a handler that pumps messages, for example by
//! opening a modal dialog) finds the slot empty and the caller forwards it
//! without touching engine state.

use std::cell::Cell;
use std::marker::PhantomData;
use std::ptr::NonNull;

use super::HookSink;

thread_local! {
    static ACTIVE_SINK: Cell<Option<NonNull<dyn HookSink + 'static>>> = const { Cell::new(None) };
}

/// Publishes a sink in the slot and restores the previous value on drop.
pub(crate) struct SinkGuard<'a> {
    previous: Option<NonNull<dyn HookSink + 'static>>,
    _sink: PhantomData<&'a mut dyn HookSink>,
}

impl<'a> SinkGuard<'a> {
    pub(crate) fn publish(sink: &'a mut (dyn HookSink + 'a)) -> Self {
        let ptr: NonNull<dyn HookSink + 'a> = NonNull::from(sink);
        // SAFETY: only the trait object lifetime is erased. The guard borrows
        // the sink for 'a and removes the pointer from the slot on drop, so
        // the pointer is never reachable after the borrow ends.
        let ptr: NonNull<dyn HookSink + 'static> = unsafe { std::mem::transmute(ptr) };
        let previous = ACTIVE_SINK.with(|slot| slot.replace(Some(ptr)));
        Self {
            previous,
            _sink: PhantomData,
        }
    }
}

impl Drop for SinkGuard<'_> {
    fn drop(&mut self) {
        ACTIVE_SINK.with(|slot| slot.set(self.previous));
    }
}

/// Runs `f` with exclusive access to the published sink.
///
/// Returns `None` without calling `f` when no sink is published or when the
/// published sink is already in use further up the stack.
pub(crate) fn with_active_sink(f: impl FnOnce(&mut dyn HookSink) -> isize) -> Option<isize> {
    let ptr = ACTIVE_SINK.with(|slot| slot.take())?;
    // Put the pointer back even if `f` unwinds.
    struct Restore(NonNull<dyn HookSink + 'static>);
    impl Drop for Restore {
        fn drop(&mut self) {
            ACTIVE_SINK.with(|slot| slot.set(Some(self.0)));
        }
    }
    let restore = Restore(ptr);
    // SAFETY: the pointer was published by a live SinkGuard on this thread and
    // has been taken out of the slot, so this is the only reference to it.
    Some(f(unsafe { &mut *restore.0.as_ptr() }))
}
