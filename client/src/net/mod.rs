//! Networking modules for the extraction REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles HTTP calls and browser downloads, and `types` defines the
//! JSON schema shared with the server.

pub mod api;
pub mod types;
