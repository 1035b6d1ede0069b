//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own extraction, history, and CSV concerns so route
//! handlers can stay focused on query parsing and response shaping.

pub mod channel;
pub mod csv_export;
pub mod ledger;
pub mod scraper;
pub mod ytdlp;
