// File: src/codec/mod.rs
//
// Identifier Codec
//
// Pure conversions between human-readable on-chain identifiers and the
// compact fixed-width integer encodings used to build table keys. No I/O,
// no state; every operation is exact over the full 64/128-bit domain.

/// Account-name encoding (restricted 13-character alphabet into a u64)
pub mod name;

/// Token symbol-code encoding (1-7 uppercase letters into 56 bits)
pub mod symbol;

/// 128-bit composite table keys built from two u64 halves
pub mod key128;

pub use key128::{compose, compose_key, key_hi, key_lo, split_hi, split_lo};
pub use name::{decode_name, encode_name, is_valid_name};
pub use symbol::{decode_symbol, encode_symbol};
