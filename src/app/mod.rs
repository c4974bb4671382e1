//! Main application modules.
//!
//! This module provides the results preview and the run summary printed by
//! the CLI after a search.

pub mod preview;
pub mod statistics;

pub use preview::{truncate_ad_text, write_details, write_preview};
pub use statistics::log_search_summary;
