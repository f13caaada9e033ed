// File: src/utilities/mod.rs
//
// Test Utilities
//
// Helpers shared by test units: on-chain time-point string manipulation and
// bulk account-name generation.

/// Time-point string helpers for on-chain time fields
pub mod time;

/// Sequential account-name generation
pub mod names;

pub use names::generate_account_names;
pub use time::{add_seconds, current_time, epoch_secs, TIME_POINT_MAX, TIME_POINT_MIN};
