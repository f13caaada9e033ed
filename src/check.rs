// File: src/check.rs
//
// Assertion and Error-Classification Layer
//
// Two concerns meet here: turning a test author's boolean check into a
// raised, catchable error with a useful message, and classifying a failed
// client invocation's output text into the structured contract-check error
// the fixture engine reports on. The two classification regexes are the
// crux of correctness and live in exactly one place.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::error::{HarnessError, Result};

fn error_code_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"assertion failure with error code: (\d+)").unwrap())
}

fn error_message_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"assertion failure with message: (.+)").unwrap())
}

/// Registry resolving numeric contract error codes to their messages.
#[derive(Debug, Default)]
pub struct ErrorCodeTable {
    map: HashMap<u64, String>,
}

impl ErrorCodeTable {
    /// Empty table; every lookup falls back to the unknown-code message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the message for a contract error code.
    pub fn register(&mut self, code: u64, message: impl Into<String>) {
        self.map.insert(code, message.into());
    }

    /// Resolve a code to its registered message.
    pub fn lookup(&self, code: u64) -> String {
        self.map
            .get(&code)
            .cloned()
            .unwrap_or_else(|| format!("unknown error code {}", code))
    }
}

/// Classify the output of a failed client invocation.
///
/// Patterns are tried in priority order: a numeric `error code:` assertion
/// becomes a `ContractCheck` with the code resolved through `codes`; a
/// textual `message:` assertion becomes a `ContractCheck` with code 0 and
/// the literal message; anything else is a generic error wrapping the raw
/// output.
pub fn classify_client_error(output: &str, codes: &ErrorCodeTable) -> HarnessError {
    if let Some(cap) = error_code_pattern().captures(output) {
        // the pattern guarantees digits; a value too large for u64 is not a
        // code any contract emits, fall through to the raw-output error
        if let Ok(code) = cap[1].parse::<u64>() {
            return HarnessError::ContractCheck {
                code,
                message: codes.lookup(code),
            };
        }
    }
    if let Some(cap) = error_message_pattern().captures(output) {
        return HarnessError::ContractCheck {
            code: 0,
            message: cap[1].trim_end_matches('\r').to_string(),
        };
    }
    HarnessError::runtime_unlocated(output)
}

/// Evaluate an injected predicate as a named assertion.
///
/// `expr` is the human-readable text of the check and `desc` an optional
/// description; both are embedded in the failure message. The predicate may
/// itself fail, and that evaluation failure is reported distinctly from a
/// plain `false`.
pub fn assert_expr<F>(expr: &str, desc: &str, predicate: F) -> Result<()>
where
    F: FnOnce() -> anyhow::Result<bool>,
{
    let prefix = if desc.is_empty() {
        String::new()
    } else {
        format!("{}: ", desc)
    };
    match predicate() {
        Ok(true) => {
            log::debug!("assert: {}{} [true]", prefix, expr);
            Ok(())
        }
        Ok(false) => Err(HarnessError::runtime(format!(
            "assert: {}{} [false]",
            prefix, expr
        ))),
        Err(err) => Err(HarnessError::runtime(format!(
            "assert: evaluation failed: '{}'\nexpr: {}\ndesc: {}",
            err, expr, desc
        ))),
    }
}

/// Plain-boolean convenience over [`assert_expr`].
pub fn assert_true<F>(expr: &str, desc: &str, predicate: F) -> Result<()>
where
    F: FnOnce() -> bool,
{
    assert_expr(expr, desc, || Ok(predicate()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn numeric_code_pattern_wins() {
        let mut codes = ErrorCodeTable::new();
        codes.register(5, "insufficient funds");
        let out = "Error 3050003: eosio_assert_message assertion failure\n\
                   assertion failure with error code: 5\npending console output:";
        match classify_client_error(out, &codes) {
            HarnessError::ContractCheck { code, message } => {
                assert_eq!(code, 5);
                assert_eq!(message, "insufficient funds");
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn unknown_code_gets_fallback_message() {
        let codes = ErrorCodeTable::new();
        let out = "assertion failure with error code: 77";
        match classify_client_error(out, &codes) {
            HarnessError::ContractCheck { code, message } => {
                assert_eq!(code, 77);
                assert!(message.contains("77"));
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn message_pattern_is_second_priority() {
        let codes = ErrorCodeTable::new();
        let out = "Error 3050003: assertion failure with message: overdrawn balance\nmore";
        match classify_client_error(out, &codes) {
            HarnessError::ContractCheck { code, message } => {
                assert_eq!(code, 0);
                assert_eq!(message, "overdrawn balance");
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn code_pattern_takes_priority_over_message_pattern() {
        let mut codes = ErrorCodeTable::new();
        codes.register(9, "nine");
        let out = "assertion failure with message: not this one\n\
                   assertion failure with error code: 9";
        assert!(matches!(
            classify_client_error(out, &codes),
            HarnessError::ContractCheck { code: 9, .. }
        ));
    }

    #[test]
    fn unmatched_output_becomes_generic_error() {
        let codes = ErrorCodeTable::new();
        let out = "Error 3080004: transaction exceeded the current CPU usage limit";
        match classify_client_error(out, &codes) {
            HarnessError::Runtime { message, .. } => assert_eq!(message, out),
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn assert_true_reports_false() {
        let err = assert_true("1 == 2", "arithmetic", || false).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("1 == 2"));
        assert!(text.contains("arithmetic"));
        assert!(text.contains("[false]"));
    }

    #[test]
    fn assert_expr_reports_evaluation_failure() {
        let err =
            assert_expr("balance > 0", "lookup", || Err(anyhow!("no such account"))).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("no such account"));
        assert!(text.contains("balance > 0"));
    }

    #[test]
    fn assert_true_passes() {
        assert_expr("2 + 2 == 4", "", || Ok(true)).unwrap();
        assert_true("true", "trivial", || true).unwrap();
    }
}
