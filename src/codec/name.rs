// File: src/codec/name.rs
//
// Account Name Codec
//
// On-chain account names draw from the alphabet {a-z, 1-5, .} and pack into
// a u64: 5 bits per character for the first 12 characters (most significant
// first), plus a 4-bit partial code for an optional 13th character in the
// low bits. The '.' character encodes as symbol 0, which is also the
// decoder's terminator; see `decode_name` for the resulting ambiguity.

use crate::error::{HarnessError, Result};

/// Maximum number of characters in an account name
pub const MAX_NAME_LEN: usize = 13;

// 5-bit symbol for one name character: a-z -> 6..=31, 1-5 -> 1..=5,
// everything else (i.e. '.') -> 0.
fn char_to_symbol(c: u8) -> u64 {
    match c {
        b'a'..=b'z' => (c - b'a') as u64 + 6,
        b'1'..=b'5' => (c - b'1') as u64 + 1,
        _ => 0,
    }
}

fn symbol_to_char(symbol: u64) -> Option<char> {
    match symbol {
        6..=31 => Some((b'a' + (symbol - 6) as u8) as char),
        1..=5 => Some((b'1' + (symbol - 1) as u8) as char),
        _ => None,
    }
}

/// Check whether `s` is a well-formed account name: 1-13 characters from
/// {a-z, 1-5, .}, not starting or ending with '.', no consecutive dots.
pub fn is_valid_name(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_NAME_LEN {
        return false;
    }
    if !s
        .bytes()
        .all(|c| c.is_ascii_lowercase() || (b'1'..=b'5').contains(&c) || c == b'.')
    {
        return false;
    }
    if s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return false;
    }
    true
}

/// Encode an account name into its u64 representation.
///
/// # Errors
///
/// Returns `InvalidIdentifier` if `s` is not a well-formed name.
pub fn encode_name(s: &str) -> Result<u64> {
    if !is_valid_name(s) {
        return Err(HarnessError::InvalidIdentifier(s.to_string()));
    }
    let bytes = s.as_bytes();
    let mut n: u64 = 0;
    let mut i = 0;
    while i < bytes.len() && i < 12 {
        n |= (char_to_symbol(bytes[i]) & 0x1f) << (64 - 5 * (i + 1));
        i += 1;
    }
    if i < bytes.len() && i == 12 {
        // 13th character carries only 4 bits, unshifted
        n |= char_to_symbol(bytes[i]) & 0x0f;
    }
    Ok(n)
}

/// Decode a u64 back into an account name.
///
/// Only the 12 shifted character slots are read; the 4-bit 13th character is
/// not recovered. Decoding stops at the first symbol with no character
/// mapping, which includes the 0 that '.' encodes to -- a name containing a
/// mid-string dot therefore decodes only up to that dot.
pub fn decode_name(n: u64) -> String {
    let mut s = String::new();
    for i in 0..12 {
        let shift = 64 - 5 * (i + 1);
        let symbol = (n >> shift) & 0x1f;
        match symbol_to_char(symbol) {
            Some(c) => s.push(c),
            None => break,
        }
    }
    s
}
