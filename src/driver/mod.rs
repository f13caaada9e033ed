// File: src/driver/mod.rs
//
// External Process Bridge
//
// Everything that reaches outside the test process lives here: the client
// session that shells out to the command-line client, the driver-call
// convention (`<root>/drivers/<name>/<command...>`), and the node-instance
// lifecycle built on top of both. All invocations are synchronous; the
// caller blocks until the child exits.

/// Client session configuration and the three client invocation shapes
pub mod session;

/// Node-instance setup/teardown through the instance driver
pub mod instance;

pub use instance::{setup, teardown, NodeInstance, DEFAULT_CLIENT_PROVIDER, DEFAULT_NODE_DRIVER};
pub use session::{
    ClientSession, LOCAL_ERROR_MISSING_ARGUMENT, LOCAL_ERROR_MISSING_COMMAND,
    LOCAL_ERROR_UNCONFIGURED, NO_EXIT_CODE,
};

/// Process exit code the outer test runner reads as "test intentionally
/// skipped", distinct from pass (0) and fail (1).
pub const SKIP_EXIT_CODE: i32 = 32;

/// End the test process with the reserved skip exit code.
pub fn skip_test() -> ! {
    println!(
        "skip_test: ending test with the skip return code ({})",
        SKIP_EXIT_CODE
    );
    std::process::exit(SKIP_EXIT_CODE);
}
