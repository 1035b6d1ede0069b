//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, clock) and channel URL
//! formatting from page and component logic so both stay testable off-WASM.

pub mod channel;
pub mod storage;
