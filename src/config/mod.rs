//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (pacing, timeouts, metric naming)
//! - CLI option types and parsing
//! - The library `Config` and its validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    parse_domain_list, Config, Credentials, LogFormat, LogLevel, Opt, RecordGranularity,
};
