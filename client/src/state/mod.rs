//! Client-side application state modules.
//!
//! DESIGN
//! ======
//! Each module holds a plain struct stored in an `RwSignal` context. State
//! transitions are methods on those structs so they can be unit-tested
//! without a reactive runtime.

pub mod extraction;
pub mod form;
pub mod notifications;
