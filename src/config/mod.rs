//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoint, default criteria, timings)
//! - Configuration types used by the library and the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, RetrySettings};
