// File: src/codec/key128.rs
//
// 128-bit Composite Table Keys
//
// Secondary table indexes use 128-bit keys formed from two u64 halves and
// exchanged with the client as unsigned base-10 decimal strings. Arithmetic
// is native u128; there is no floating-point intermediate anywhere.
//
// The `Option` parameters on the composing entry points are deliberate:
// halves usually come out of parsed client output, where a field can simply
// be absent, and that absence must surface as `MissingOperand` rather than
// a silent zero.

use crate::error::{HarnessError, Result};

/// Compose a 128-bit key from its two halves.
pub fn compose(hi: u64, lo: u64) -> u128 {
    ((hi as u128) << 64) | lo as u128
}

/// High 64 bits of a composite key.
pub fn split_hi(value: u128) -> u64 {
    (value >> 64) as u64
}

/// Low 64 bits of a composite key.
pub fn split_lo(value: u128) -> u64 {
    (value & u64::MAX as u128) as u64
}

/// Compose a key from possibly-absent halves, rendered as a decimal string.
///
/// # Errors
///
/// Returns `MissingOperand` naming the absent half.
pub fn compose_key(hi: Option<u64>, lo: Option<u64>) -> Result<String> {
    let hi = hi.ok_or(HarnessError::MissingOperand("hi"))?;
    let lo = lo.ok_or(HarnessError::MissingOperand("lo"))?;
    Ok(compose(hi, lo).to_string())
}

/// High half of a possibly-absent composite key value.
pub fn key_hi(value: Option<u128>) -> Result<u64> {
    value
        .map(split_hi)
        .ok_or(HarnessError::MissingOperand("hi"))
}

/// Low half of a possibly-absent composite key value.
pub fn key_lo(value: Option<u128>) -> Result<u64> {
    value
        .map(split_lo)
        .ok_or(HarnessError::MissingOperand("lo"))
}
