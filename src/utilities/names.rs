// File: src/utilities/names.rs
//
// Sequential Account-Name Generation
//
// Bulk tests need many distinct account names. Names are generated by
// appending a pattern to a fixed prefix and incrementing the pattern like a
// base-26 counter over 'a'..='z', rippling carries leftward.

/// Generate `count` account names: `prefix + pattern`, with the pattern
/// incremented once per name. A full overflow wraps the pattern around.
pub fn generate_account_names(prefix: &str, pattern: &str, count: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(count);
    let mut chars: Vec<u8> = pattern.bytes().collect();

    for _ in 0..count {
        names.push(format!(
            "{}{}",
            prefix,
            String::from_utf8_lossy(&chars)
        ));

        let mut idx = chars.len();
        while idx > 0 {
            idx -= 1;
            if chars[idx] == b'z' {
                chars[idx] = b'a';
            } else {
                chars[idx] += 1;
                break;
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::is_valid_name;

    #[test]
    fn simple_sequence() {
        assert_eq!(
            generate_account_names("", "aaag", 4),
            vec!["aaag", "aaah", "aaai", "aaaj"]
        );
    }

    #[test]
    fn carry_ripples_left() {
        assert_eq!(
            generate_account_names("acct.", "az", 2),
            vec!["acct.az", "acct.ba"]
        );
        assert_eq!(generate_account_names("", "zz", 2), vec!["zz", "aa"]);
    }

    #[test]
    fn generated_names_are_valid_identifiers() {
        for name in generate_account_names("tester", "aa", 30) {
            assert!(is_valid_name(&name), "invalid generated name: {}", name);
        }
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_account_names("x", "aa", 0).is_empty());
    }
}
