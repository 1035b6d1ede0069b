//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the extraction results, the comment preview, the clear
//! confirmation, and toasts. Results components take plain values; the
//! dialog and toast stack read shared state from Leptos context.

pub mod analytics_panel;
pub mod comments_table;
pub mod confirm_clear_dialog;
pub mod notifications;
pub mod results_table;
