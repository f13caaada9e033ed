// File: src/fixture/mod.rs
//
// Fixture Execution Engine
//
// Runs many independent test units inside one long-lived process. Each unit
// is isolated at its boundary: an `Err` return or a panic fails that unit,
// records a result string, bumps the tally, and never aborts the units that
// follow. The engine owns all run-wide mutable state (session, current-unit
// identity, results, counters); nothing here is ambient or global.

/// Name-keyed registry of runnable units
pub mod registry;

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::check::{classify_client_error, ErrorCodeTable};
use crate::driver::instance::{self, NodeInstance, DEFAULT_CLIENT_PROVIDER, DEFAULT_NODE_DRIVER};
use crate::driver::session::ClientSession;
use crate::error::{HarnessError, Result};

pub use registry::{TestRegistry, UnitFn};

/// Current-unit identity of the run, owned by the engine and surfaced in
/// log prefixes and failure messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentUnit {
    /// No run active (default)
    NoFixture,
    /// Bracket state while the environment is being set up
    Init,
    /// Bracket state after a unit completed, until the next one starts
    Finish,
    /// A unit is running
    Unit(String),
}

impl std::fmt::Display for CurrentUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrentUnit::NoFixture => write!(f, "NO_FIXTURE"),
            CurrentUnit::Init => write!(f, "FIXTURE_INIT"),
            CurrentUnit::Finish => write!(f, "FIXTURE_FINISH"),
            CurrentUnit::Unit(name) => write!(f, "{}", name),
        }
    }
}

/// Run-wide state handed to every unit: the client session, the node
/// instance, the current-unit identity and the contract error-code table.
pub struct FixtureContext {
    /// Client session used by all invocations of this run
    pub session: ClientSession,
    instance: Option<NodeInstance>,
    current: CurrentUnit,
    error_codes: ErrorCodeTable,
    node_driver: String,
    provider: String,
}

impl FixtureContext {
    fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            session: ClientSession::new(root_dir),
            instance: None,
            current: CurrentUnit::NoFixture,
            error_codes: ErrorCodeTable::new(),
            node_driver: DEFAULT_NODE_DRIVER.to_string(),
            provider: DEFAULT_CLIENT_PROVIDER.to_string(),
        }
    }

    /// Current-unit identity.
    pub fn current(&self) -> &CurrentUnit {
        &self.current
    }

    /// True while inside a unit (not in a bracket state).
    pub fn running(&self) -> bool {
        matches!(self.current, CurrentUnit::Unit(_))
    }

    /// The node instance recorded by `bootstrap`, if any.
    pub fn instance(&self) -> Option<&NodeInstance> {
        self.instance.as_ref()
    }

    /// Override the node driver name (default `hotstart`).
    pub fn set_node_driver(&mut self, name: &str) {
        self.node_driver = name.to_string();
    }

    /// Override the wallet provider driver name (default `cleos-driver`).
    pub fn set_provider_driver(&mut self, name: &str) {
        self.provider = name.to_string();
    }

    /// Register a contract error-code message used by classification.
    pub fn register_error_code(&mut self, code: u64, message: impl Into<String>) {
        self.error_codes.register(code, message);
    }

    /// Invoke the client; a nonzero status is classified into a
    /// `ContractCheck` error when the output carries an on-chain assertion
    /// failure, or a generic error wrapping the raw output otherwise.
    pub fn client(&self, args: &str) -> Result<String> {
        let (output, code) = self.session.invoke_capture2(args);
        if code != 0 {
            return Err(classify_client_error(&output, &self.error_codes));
        }
        Ok(output)
    }

    /// Invoke the client and hand back `(text, status)` unclassified.
    pub fn client_no_throw(&self, args: &str) -> (String, i32) {
        self.session.invoke_capture2(args)
    }

    /// Log a message prefixed with the current unit name.
    pub fn log(&self, msg: &str) {
        match &self.current {
            CurrentUnit::NoFixture => log::info!("TEST: {}", msg),
            current => log::info!("TEST [{}]: {}", current, msg),
        }
    }

    /// Log a warning prefixed with the current unit name.
    pub fn warn(&self, msg: &str) {
        log::warn!("TEST [{}]: {}", self.current, msg);
    }

    /// Log an error prefixed with the current unit name.
    pub fn error(&self, msg: &str) {
        log::error!("TEST [{}]: {}", self.current, msg);
    }

    /// Raise a crash of the current unit, with location metadata.
    #[track_caller]
    pub fn crashed(&self, msg: &str) -> HarnessError {
        HarnessError::runtime(format!("TEST [{}]: crashed: {}", self.current, msg))
    }

    /// Raise a failure of the current unit, with location metadata.
    #[track_caller]
    pub fn failed(&self, msg: &str) -> HarnessError {
        HarnessError::runtime(format!("TEST [{}]: failed: {}", self.current, msg))
    }
}

/// The engine: a registry of units plus the run's context, ordered results
/// and pass/fail tally.
pub struct FixtureEngine {
    registry: TestRegistry,
    ctx: FixtureContext,
    results: IndexMap<String, String>,
    passed: u32,
    failed: u32,
    last_error: Option<anyhow::Error>,
    cleanup: Option<UnitFn>,
}

impl FixtureEngine {
    /// Engine rooted at the harness installation directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry: TestRegistry::new(),
            ctx: FixtureContext::new(root_dir),
            results: IndexMap::new(),
            passed: 0,
            failed: 0,
            last_error: None,
            cleanup: None,
        }
    }

    /// Run-wide context (session configuration, error codes, identity).
    pub fn ctx(&self) -> &FixtureContext {
        &self.ctx
    }

    /// Mutable context access for pre-run configuration.
    pub fn ctx_mut(&mut self) -> &mut FixtureContext {
        &mut self.ctx
    }

    /// Register a unit under `name`.
    pub fn register_unit<F>(&mut self, name: impl Into<String>, unit: F)
    where
        F: Fn(&mut FixtureContext) -> anyhow::Result<()> + 'static,
    {
        self.registry.register(name, unit);
    }

    /// Configure the cleanup routine run before units that request a reset.
    pub fn set_cleanup<F>(&mut self, cleanup: F)
    where
        F: Fn(&mut FixtureContext) -> anyhow::Result<()> + 'static,
    {
        self.cleanup = Some(Box::new(cleanup));
    }

    /// Perform environment setup (start a node instance, bind the session)
    /// and move the identity into the init bracket state.
    pub fn bootstrap(&mut self, start_args: &str) -> Result<()> {
        log::info!("bootstrap: initializing test run...");
        let instance = instance::setup(
            &mut self.ctx.session,
            &self.ctx.node_driver,
            &self.ctx.provider,
            start_args,
        )?;
        self.ctx.instance = Some(instance);
        self.ctx.current = CurrentUnit::Init;
        log::info!("bootstrap: initialization OK");
        Ok(())
    }

    /// Run one unit. With `reset_first`, the configured cleanup routine runs
    /// first; a missing or failing cleanup records a failure and the unit is
    /// never executed. A unit failure (error return or panic) is caught at
    /// the boundary: it is classified, recorded and tallied, and the run
    /// continues. The identity ends in the finish bracket state regardless
    /// of outcome.
    pub fn run_unit(&mut self, name: &str, reset_first: bool) {
        self.ctx.current = CurrentUnit::Unit(name.to_string());
        let mut result = String::new();

        if reset_first {
            match &self.cleanup {
                None => {
                    log::error!(
                        "run_unit: cannot reset fixture before '{}': no cleanup routine configured",
                        name
                    );
                    result = "Failed (no fixture cleanup routine configured).".to_string();
                    self.failed += 1;
                }
                Some(cleanup) => {
                    log::info!("run_unit: clearing fixture before running '{}'...", name);
                    if let Err(err) = run_protected(cleanup, &mut self.ctx) {
                        log::error!(
                            "run_unit: error clearing fixture before '{}': {:#}",
                            name,
                            err
                        );
                        result = format!("Failed (fixture cleanup error: {}).", root_message(&err));
                        self.failed += 1;
                    }
                }
            }
        }

        if result.is_empty() {
            log::info!("run_unit: running '{}'...", name);
            match self.registry.get(name) {
                None => {
                    log::error!("run_unit: no unit registered under '{}'", name);
                    result = format!("Failed (no unit registered under '{}').", name);
                    self.failed += 1;
                    self.last_error = Some(
                        HarnessError::runtime_unlocated(format!(
                            "no unit registered under '{}'",
                            name
                        ))
                        .into(),
                    );
                }
                Some(unit) => match run_protected(unit, &mut self.ctx) {
                    Ok(()) => {
                        result = "Passed.".to_string();
                        self.passed += 1;
                        self.last_error = None;
                    }
                    Err(err) => {
                        result = failure_result(&err);
                        log::error!("run_unit: caught error running '{}': {:#}", name, err);
                        self.failed += 1;
                        self.last_error = Some(err);
                    }
                },
            }
        }

        // IndexMap keeps the first insertion position on rerun, so the
        // summary stays in execution order while the string is replaced.
        self.results.insert(name.to_string(), result.clone());
        log::info!("run_unit: {}: {}", name, result);
        self.ctx.current = CurrentUnit::Finish;
    }

    /// Pass/fail tally.
    pub fn counts(&self) -> (u32, u32) {
        (self.passed, self.failed)
    }

    /// Error stored by the most recent failing unit, cleared by a pass.
    pub fn last_error(&self) -> Option<&anyhow::Error> {
        self.last_error.as_ref()
    }

    /// Last recorded result string for a unit.
    pub fn result_of(&self, name: &str) -> Option<&str> {
        self.results.get(name).map(String::as_str)
    }

    /// Ordered listing of every unit with its last recorded result.
    pub fn summary(&self) -> String {
        let mut s = String::from("Fixture testing summary:\n\n");
        for (name, result) in &self.results {
            s.push_str(&format!("  {}: {}\n", name, result));
        }
        s
    }

    /// Tear down the environment and produce the run's exit code.
    ///
    /// With a fatal (run-scoped, not unit-scoped) error the summary is
    /// skipped and the code is 1. Otherwise the summary is printed and the
    /// code is 1 iff any unit failed, else 0.
    pub fn teardown(&mut self, fatal: Option<anyhow::Error>) -> i32 {
        log::info!("teardown: finishing test run...");
        instance::teardown(
            &self.ctx.session,
            &self.ctx.node_driver,
            self.ctx.instance.as_ref(),
        );

        if let Some(err) = fatal {
            log::error!("teardown: test run was aborted by a fatal error: {:#}", err);
            return 1;
        }

        println!("\n{}", self.summary());

        let (passed, failed) = self.counts();
        let total = passed + failed;
        if failed > 0 {
            log::error!("teardown: failed {} tests of {} total", failed, total);
            1
        } else {
            log::info!("teardown: completed all ({}) tests successfully", total);
            0
        }
    }
}

// Unit boundary: error returns and panics both become Err here.
fn run_protected(unit: &UnitFn, ctx: &mut FixtureContext) -> anyhow::Result<()> {
    match panic::catch_unwind(AssertUnwindSafe(|| unit(ctx))) {
        Ok(result) => result,
        Err(payload) => Err(anyhow::anyhow!("unit panicked: {}", panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn root_message(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}

// Build the recorded result string for a failed unit: contract-check
// failures embed message and code, runtime errors embed their location
// metadata when present.
fn failure_result(err: &anyhow::Error) -> String {
    match err.downcast_ref::<HarnessError>() {
        Some(HarnessError::ContractCheck { code, message }) => {
            if *code > 0 {
                format!("Failed, '{}' ({}).", message, code)
            } else {
                format!("Failed, '{}'.", message)
            }
        }
        Some(e @ HarnessError::Runtime { .. }) => match e.location() {
            Some(loc) => format!("Failed at line {}.", loc),
            None => "Failed.".to_string(),
        },
        _ => "Failed.".to_string(),
    }
}
