//! Hook engine and dispatch loop.
//!
//! - **`engine`**   – Installs and removes the low-level hooks, runs the
//!   callback bodies (translate, track pressed keys, call the handler,
//!   forward), and owns teardown.
//!
//! - **`dispatch`** – The blocking message pump that keeps the hooks alive and
//!   decides when it is over.
//!
//! Neither module makes OS calls directly; both go through
//! [`HookBackend`](crate::infrastructure::hook_backend::HookBackend).

pub mod dispatch;
pub mod engine;
