//! OS-facing adapters: the low-level hook backend and config file storage.
//!
//! **Dependency rule**: this layer may depend on `llhook_core`, but MUST NOT
//! import the `application` layer.

pub mod hook_backend;
pub mod storage;
