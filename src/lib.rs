//! # Chain Test Harness
//!
//! Test-support library for exercising a blockchain node and its
//! command-line client from long-lived test processes.
//!
//! ## Architecture Overview
//!
//! - **codec**: pure, bit-exact conversions between human-readable
//!   account/symbol identifiers and the fixed-width integer encodings used
//!   to build on-chain table keys
//! - **driver**: the process bridge — a configured client session, the
//!   driver-call convention, and node-instance setup/teardown
//! - **check**: assertions as injected predicates, plus classification of
//!   on-chain assertion failures out of client output
//! - **fixture**: the execution engine running many independent test units
//!   in one process, with per-unit isolation, cleanup and tallying
//! - **utilities**: time-point string helpers and account-name generation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chain_test_harness::prelude::*;
//!
//! let mut engine = FixtureEngine::new("/opt/harness");
//! engine.register_unit("transfer.basic", |ctx| {
//!     let out = ctx.client("push action token transfer '[...]' -p alice")?;
//!     assert_true("transfer accepted", "", || !out.is_empty())?;
//!     Ok(())
//! });
//!
//! if let Err(err) = engine.bootstrap("") {
//!     std::process::exit(engine.teardown(Some(err.into())));
//! }
//! engine.run_unit("transfer.basic", false);
//! std::process::exit(engine.teardown(None));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: session config, current-unit identity and tallies
//!    live on the engine, never in process globals
//! 2. **Isolation**: a unit failure (error or panic) never aborts the units
//!    that follow
//! 3. **Exact codecs**: no floating-point intermediates anywhere in the
//!    64/128-bit key arithmetic
//! 4. **Units as callables**: tests register closures by name; the engine
//!    loads no code from files

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Assertion helpers and client-error classification
pub mod check;

/// Identifier, symbol and composite-key codecs
pub mod codec;

/// Client session, driver calls and node-instance lifecycle
pub mod driver;

/// Harness error taxonomy
pub mod error;

/// Fixture execution engine and unit registry
pub mod fixture;

/// Shared test utilities
pub mod utilities;

/// Convenient re-exports for common usage
pub mod prelude;

pub use check::{assert_expr, assert_true, classify_client_error, ErrorCodeTable};
pub use driver::{skip_test, ClientSession, SKIP_EXIT_CODE};
pub use error::HarnessError;
pub use fixture::{CurrentUnit, FixtureContext, FixtureEngine, TestRegistry};

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
