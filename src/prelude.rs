// File: src/prelude.rs
//
// Convenient re-exports for test units and run files.

pub use crate::check::{assert_expr, assert_true, ErrorCodeTable};
pub use crate::codec::{
    compose_key, decode_name, decode_symbol, encode_name, encode_symbol, is_valid_name, key_hi,
    key_lo,
};
pub use crate::driver::{skip_test, ClientSession, NodeInstance, SKIP_EXIT_CODE};
pub use crate::error::HarnessError;
pub use crate::fixture::{CurrentUnit, FixtureContext, FixtureEngine};
pub use crate::utilities::{
    add_seconds, current_time, epoch_secs, generate_account_names, TIME_POINT_MAX, TIME_POINT_MIN,
};
