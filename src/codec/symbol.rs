// File: src/codec/symbol.rs
//
// Symbol Code Codec
//
// Token symbol codes are 1-7 uppercase ASCII letters packed little-endian
// into the low 56 bits of a u64: byte i of the value is the character code
// of character i. Decoding stops at the first zero byte.

use crate::error::{HarnessError, Result};

/// Upper bound (exclusive) for a packed symbol code: 2^56
pub const SYMBOL_CODE_LIMIT: u64 = 1 << 56;

/// Encode a symbol code string into its packed u64 value.
///
/// # Errors
///
/// Returns `InvalidSymbol` if the string is not 1-7 characters or contains
/// anything outside `A-Z`.
pub fn encode_symbol(s: &str) -> Result<u64> {
    if s.is_empty() || s.len() > 7 {
        return Err(HarnessError::InvalidSymbol(format!(
            "'{}' must have between 1 and 7 characters",
            s
        )));
    }
    let mut result: u64 = 0;
    for (i, c) in s.bytes().enumerate() {
        if !c.is_ascii_uppercase() {
            return Err(HarnessError::InvalidSymbol(format!(
                "invalid character in '{}'",
                s
            )));
        }
        result |= (c as u64) << (8 * i);
    }
    Ok(result)
}

/// Decode a packed symbol value back into its string form.
///
/// # Errors
///
/// Returns `OutOfRange` if the value does not fit in 56 bits, and
/// `InvalidSymbol` if a nonzero byte is not an uppercase letter.
pub fn decode_symbol(n: u64) -> Result<String> {
    if n >= SYMBOL_CODE_LIMIT {
        return Err(HarnessError::OutOfRange(n));
    }
    let mut result = String::new();
    for i in 0..7 {
        let byte = ((n >> (8 * i)) & 0xff) as u8;
        if byte == 0 {
            break;
        }
        if !byte.is_ascii_uppercase() {
            return Err(HarnessError::InvalidSymbol(format!(
                "invalid character code {} in symbol value {}",
                byte, n
            )));
        }
        result.push(byte as char);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_symbol_values() {
        // "EOS" = 0x53 0x4f 0x45 little-endian
        assert_eq!(encode_symbol("EOS").unwrap(), 0x53_4f_45);
        assert_eq!(decode_symbol(0x53_4f_45).unwrap(), "EOS");
        assert_eq!(encode_symbol("A").unwrap(), 0x41);
    }

    #[test]
    fn invalid_symbols_are_rejected() {
        for bad in ["", "TOOLONGSYM", "abc", "EO5", "E S"] {
            assert!(
                matches!(encode_symbol(bad), Err(HarnessError::InvalidSymbol(_))),
                "expected rejection of {:?}",
                bad
            );
        }
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        assert!(matches!(
            decode_symbol(SYMBOL_CODE_LIMIT),
            Err(HarnessError::OutOfRange(_))
        ));
        assert!(matches!(
            decode_symbol(u64::MAX),
            Err(HarnessError::OutOfRange(_))
        ));
    }

    #[test]
    fn nonzero_garbage_byte_fails_decode() {
        // low byte 0x20 (space) is nonzero but not a letter
        assert!(matches!(
            decode_symbol(0x20),
            Err(HarnessError::InvalidSymbol(_))
        ));
    }

    proptest! {
        #[test]
        fn symbols_round_trip(s in "[A-Z]{1,7}") {
            let n = encode_symbol(&s).unwrap();
            prop_assert!(n < SYMBOL_CODE_LIMIT);
            prop_assert_eq!(decode_symbol(n).unwrap(), s);
        }
    }
}
