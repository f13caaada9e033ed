// File: src/error.rs
//
// Harness Error Taxonomy
//
// One enum covers every failure the harness itself can produce. Unit bodies
// use anyhow; the engine downcasts back to HarnessError at the unit boundary
// to classify contract-check failures and recover location metadata.

use std::panic::Location;

use thiserror::Error;

/// Errors produced by the harness library
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Client session used before it was fully configured. Always a caller
    /// bug; never retried.
    #[error("client session is not configured: {0}")]
    Configuration(String),

    /// Account name violates the identifier alphabet or shape rules
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Symbol code violates the 1-7 uppercase-letter rule
    #[error("invalid symbol code: {0}")]
    InvalidSymbol(String),

    /// Symbol value does not fit in 56 bits
    #[error("symbol value out of range: {0}")]
    OutOfRange(u64),

    /// A composing operation was handed an absent operand
    #[error("missing operand: {0}")]
    MissingOperand(&'static str),

    /// External command exited nonzero (or died without an exit code,
    /// reported as the -1 sentinel)
    #[error("command failed with exit code {code}: {output}")]
    ProcessFailure {
        /// Exit code of the child, or -1 when none was obtainable
        code: i32,
        /// Full error text of the failed invocation
        output: String,
    },

    /// An on-chain check failed inside the contract, classified out of the
    /// client's error output
    #[error("contract check failed with error code: {code}, message: {message}")]
    ContractCheck {
        /// Numeric contract error code (0 for message-only failures)
        code: u64,
        /// Resolved or literal failure message
        message: String,
    },

    /// Anything else a test unit can raise
    #[error("{message}")]
    Runtime {
        /// Human-readable failure description
        message: String,
        /// Source location of the raising call site, when constructed
        /// through the track_caller helpers
        location: Option<String>,
    },
}

impl HarnessError {
    /// Build a `Runtime` error carrying the caller's source location.
    #[track_caller]
    pub fn runtime(message: impl Into<String>) -> Self {
        let loc = Location::caller();
        HarnessError::Runtime {
            message: message.into(),
            location: Some(format!("{}:{}", loc.line(), loc.column())),
        }
    }

    /// Build a `Runtime` error with no location metadata.
    pub fn runtime_unlocated(message: impl Into<String>) -> Self {
        HarnessError::Runtime {
            message: message.into(),
            location: None,
        }
    }

    /// Location metadata, when present.
    pub fn location(&self) -> Option<&str> {
        match self {
            HarnessError::Runtime { location, .. } => location.as_deref(),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the harness
pub type Result<T, E = HarnessError> = std::result::Result<T, E>;
