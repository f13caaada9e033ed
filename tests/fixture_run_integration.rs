//! End-to-end fixture run against a fake driver installation
//!
//! Builds a harness root in a temp directory with stub `hotstart` driver
//! programs and a stub client binary, then drives a full bootstrap ->
//! run-units -> teardown cycle through the engine.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use chain_test_harness::prelude::*;
use tempfile::TempDir;

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fake harness root: hotstart driver scripts plus a stub client that fails
/// `push` commands with an on-chain assertion and answers everything else.
fn fake_harness_root() -> (TempDir, PathBuf) {
    let root = TempDir::new().unwrap();
    let driver_dir = root.path().join("drivers").join("hotstart");
    fs::create_dir_all(&driver_dir).unwrap();
    fs::create_dir_all(root.path().join("local").join("cleos-driver")).unwrap();

    write_script(&driver_dir.join("start"), "#!/bin/sh\nexit 0\n");
    write_script(&driver_dir.join("findinstance"), "#!/bin/sh\necho 8888\n");
    write_script(&driver_dir.join("clearinstance"), "#!/bin/sh\nexit 0\n");

    let client = root.path().join("client-stub");
    write_script(
        &client,
        "#!/bin/sh\n\
         case \"$*\" in\n\
         *push*)\n\
           echo 'Error 3050003: eosio_assert_message assertion failure' >&2\n\
           echo 'assertion failure with error code: 5' >&2\n\
           exit 1 ;;\n\
         *)\n\
           echo 'ok' ;;\n\
         esac\n",
    );

    (root, client)
}

fn engine_with_stub() -> (TempDir, FixtureEngine) {
    init_logging();
    let (root, client) = fake_harness_root();
    let mut engine = FixtureEngine::new(root.path());
    engine
        .ctx_mut()
        .session
        .set_client_bin(&client.display().to_string());
    (root, engine)
}

#[test]
fn bootstrap_resolves_ports_from_driver() {
    let (_root, mut engine) = engine_with_stub();
    engine.bootstrap("").unwrap();

    let instance = engine.ctx().instance().unwrap();
    assert_eq!(instance.port, 8888);
    assert_eq!(instance.web_port, 18888);
    assert_eq!(*engine.ctx().current(), CurrentUnit::Init);
}

#[test]
fn three_unit_run_with_one_contract_check_failure() {
    let (_root, mut engine) = engine_with_stub();
    engine.ctx_mut().register_error_code(5, "insufficient funds");
    engine.bootstrap("").unwrap();

    engine.register_unit("info.first", |ctx| {
        let out = ctx.client("get info")?;
        assert_true("client answered", "", || out == "ok")?;
        Ok(())
    });
    engine.register_unit("transfer.overdrawn", |ctx| {
        // the stub fails every push with contract error code 5
        ctx.client("push action token transfer '[...]' -p alice")?;
        Ok(())
    });
    engine.register_unit("info.last", |ctx| {
        ctx.client("get info")?;
        Ok(())
    });

    engine.run_unit("info.first", false);
    engine.run_unit("transfer.overdrawn", false);
    engine.run_unit("info.last", false);

    assert_eq!(engine.counts(), (2, 1));

    let summary = engine.summary();
    let first = summary.find("info.first").unwrap();
    let second = summary.find("transfer.overdrawn").unwrap();
    let third = summary.find("info.last").unwrap();
    assert!(first < second && second < third);

    let result = engine.result_of("transfer.overdrawn").unwrap();
    assert!(result.contains('5'), "result should carry the code: {}", result);
    assert!(result.contains("insufficient funds"));

    // failed > 0 -> overall failure
    assert_eq!(engine.teardown(None), 1);
}

#[test]
fn all_passing_run_exits_zero() {
    let (_root, mut engine) = engine_with_stub();
    engine.bootstrap("").unwrap();
    engine.register_unit("one", |ctx| {
        ctx.client("get info")?;
        Ok(())
    });
    engine.register_unit("two", |_| Ok(()));
    engine.run_unit("one", false);
    engine.run_unit("two", false);
    assert_eq!(engine.counts(), (2, 0));
    assert_eq!(engine.teardown(None), 0);
}

#[test]
fn fatal_error_skips_summary_and_fails() {
    let (_root, mut engine) = engine_with_stub();
    engine.bootstrap("").unwrap();
    engine.register_unit("one", |_| Ok(()));
    engine.run_unit("one", false);
    let code = engine.teardown(Some(anyhow::anyhow!("run file aborted")));
    assert_eq!(code, 1);
}

#[test]
fn bootstrap_fails_when_start_fails() {
    let (root, client) = fake_harness_root();
    // make `start` fail with a real exit code
    write_script(
        &root.path().join("drivers").join("hotstart").join("start"),
        "#!/bin/sh\necho 'no slots left' >&2\nexit 7\n",
    );
    let mut engine = FixtureEngine::new(root.path());
    engine
        .ctx_mut()
        .session
        .set_client_bin(&client.display().to_string());

    let err = engine.bootstrap("").unwrap_err();
    assert!(matches!(
        err,
        HarnessError::ProcessFailure { code: 7, .. }
    ));
    assert_eq!(*engine.ctx().current(), CurrentUnit::NoFixture);
}

#[test]
fn bootstrap_rejects_port_with_no_room_for_web_offset() {
    let (root, client) = fake_harness_root();
    // 60000 + 10000 does not fit a port; setup must fail, not wrap
    write_script(
        &root.path().join("drivers").join("hotstart").join("findinstance"),
        "#!/bin/sh\necho 60000\n",
    );
    let mut engine = FixtureEngine::new(root.path());
    engine
        .ctx_mut()
        .session
        .set_client_bin(&client.display().to_string());

    let err = engine.bootstrap("").unwrap_err();
    assert!(matches!(err, HarnessError::Runtime { .. }));
    assert!(err.to_string().contains("70000"), "got: {}", err);
    assert!(engine.ctx().instance().is_none());
}

#[test]
fn client_calls_fail_before_bootstrap() {
    let (_root, engine) = engine_with_stub();
    // no provider bound yet: classification sees the reserved local code
    let err = engine.ctx().client("get info").unwrap_err();
    assert!(matches!(err, HarnessError::Runtime { .. }));
    let (text, code) = engine.ctx().client_no_throw("get info");
    assert_eq!(text, "ERROR");
    assert_eq!(code, 100001);
}
