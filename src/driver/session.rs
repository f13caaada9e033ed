// File: src/driver/session.rs
//
// Client Session
//
// Owns the configuration every client invocation depends on: the harness
// root directory, the bound wallet provider, and the optional node URL.
// The session must be fully configured (provider bound) before the first
// client call; the URL may stay unset, in which case the flag is omitted.
//
// Argument strings are pre-assembled shell fragments and may contain pipes,
// so commands run through `sh -c`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{HarnessError, Result};

/// Reserved status code for a locally rejected call with a missing argument
pub const LOCAL_ERROR_MISSING_ARGUMENT: i32 = 100000;

/// Reserved status code for a call made before the session was configured
pub const LOCAL_ERROR_UNCONFIGURED: i32 = 100001;

/// Reserved status code for a driver call with an empty command. Shares the
/// second reserved value with [`LOCAL_ERROR_UNCONFIGURED`]: both mean the
/// second thing the call needed was absent.
pub const LOCAL_ERROR_MISSING_COMMAND: i32 = LOCAL_ERROR_UNCONFIGURED;

/// Sentinel status code reported when no real exit code was obtainable
/// (spawn failure or death by signal)
pub const NO_EXIT_CODE: i32 = -1;

const DEFAULT_CLIENT_BIN: &str = "cleos";

#[derive(Debug, Clone)]
struct Provider {
    driver: String,
    working_dir: PathBuf,
}

/// Process-bridge configuration for one test run.
#[derive(Debug)]
pub struct ClientSession {
    root_dir: PathBuf,
    provider: Option<Provider>,
    url_param: String,
    client_bin: String,
    trace: bool,
}

struct RawOutput {
    stdout: String,
    stderr: String,
    code: i32,
}

impl ClientSession {
    /// Create a session rooted at the harness installation directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            provider: None,
            url_param: String::new(),
            client_bin: DEFAULT_CLIENT_BIN.to_string(),
            trace: false,
        }
    }

    /// Harness root directory this session resolves drivers against.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Bind the wallet provider. The driver name resolves to its standard
    /// working directory `<root>/local/<driver>`, which holds the wallet
    /// socket used by every client call.
    pub fn set_provider(&mut self, driver: &str) -> Result<()> {
        if driver.is_empty() {
            return Err(HarnessError::Configuration(
                "provider driver name is empty".to_string(),
            ));
        }
        let working_dir = self.root_dir.join("local").join(driver);
        self.provider = Some(Provider {
            driver: driver.to_string(),
            working_dir,
        });
        Ok(())
    }

    /// Name of the bound provider driver, if any.
    pub fn provider_driver(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.driver.as_str())
    }

    /// Set the node URL passed to the client on every subsequent call.
    /// An empty URL clears the flag.
    pub fn set_url(&mut self, url: &str) {
        self.url_param = if url.is_empty() {
            String::new()
        } else {
            format!("--url={}", url)
        };
    }

    /// Override the client binary name (tests point this at a stub).
    pub fn set_client_bin(&mut self, bin: &str) {
        self.client_bin = bin.to_string();
    }

    /// Raise invocation logging from debug to full command/output dumps.
    pub fn set_trace(&mut self, value: bool) {
        self.trace = value;
    }

    fn trace_log(&self, msg: &str) {
        if self.trace {
            log::info!("{}", msg);
        } else {
            log::debug!("{}", msg);
        }
    }

    fn client_command(&self, args: &str) -> Result<String> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            HarnessError::Configuration("client provider was not set".to_string())
        })?;
        let mut parts = vec![self.client_bin.as_str()];
        if !self.url_param.is_empty() {
            parts.push(&self.url_param);
        }
        let wallet_url = format!(
            "--wallet-url unix://{}/keosd.sock",
            provider.working_dir.display()
        );
        parts.push(&wallet_url);
        parts.push("--verbose");
        parts.push(args);
        Ok(parts.join(" "))
    }

    // Blocking shell execution; never returns an error, a failed spawn is
    // reported through the -1 sentinel.
    fn run_shell(&self, cmd: &str) -> RawOutput {
        self.trace_log(&format!("run command: {}", cmd));
        match Command::new("sh").arg("-c").arg(cmd).output() {
            Ok(output) => RawOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                code: output.status.code().unwrap_or(NO_EXIT_CODE),
            },
            Err(err) => RawOutput {
                stdout: String::new(),
                stderr: format!("failed to spawn '{}': {}", cmd, err),
                code: NO_EXIT_CODE,
            },
        }
    }

    fn failure_text(cmd: &str, raw: &RawOutput) -> String {
        let mut text = format!("Error: command failed: {}", cmd);
        if !raw.stderr.is_empty() {
            text.push('\n');
            text.push_str(&raw.stderr);
        }
        if !raw.stdout.is_empty() {
            text.push('\n');
            text.push_str(&raw.stdout);
        }
        text
    }

    /// Invoke the client and report success or failure only. The captured
    /// output is logged, not returned.
    ///
    /// # Errors
    ///
    /// `Configuration` before spawning if no provider is bound;
    /// `ProcessFailure` carrying the exit code (or the -1 sentinel) and the
    /// full error text otherwise.
    pub fn invoke(&self, args: &str) -> Result<()> {
        let cmd = self.client_command(args)?;
        let raw = self.run_shell(&cmd);
        if raw.code == 0 {
            self.trace_log(&format!("command successful, output:\n{}", raw.stdout));
            return Ok(());
        }
        let output = Self::failure_text(&cmd, &raw);
        // The caller never sees the output on this shape, so dump it here.
        log::error!(
            "invoke: command returned a nonzero (error) code: {}\n{}",
            raw.code,
            output
        );
        Err(HarnessError::ProcessFailure {
            code: raw.code,
            output,
        })
    }

    /// Invoke the client and return its stdout, trimmed of surrounding
    /// whitespace. Failure yields an error, never partial output.
    pub fn invoke_capture(&self, args: &str) -> Result<String> {
        let cmd = self.client_command(args)?;
        let raw = self.run_shell(&cmd);
        if raw.code == 0 {
            self.trace_log(&format!("command successful, output:\n{}", raw.stdout));
            return Ok(raw.stdout.trim().to_string());
        }
        let output = Self::failure_text(&cmd, &raw);
        log::error!(
            "invoke_capture: command returned a nonzero (error) code: {}\n{}",
            raw.code,
            output
        );
        Err(HarnessError::ProcessFailure {
            code: raw.code,
            output,
        })
    }

    /// Invoke the client and always return `(text, status)`: trimmed stdout
    /// with status 0 on success, the full error text with the real exit code
    /// (or the -1 sentinel) on failure. A call made before the provider is
    /// bound returns the reserved local code without spawning anything.
    pub fn invoke_capture2(&self, args: &str) -> (String, i32) {
        let cmd = match self.client_command(args) {
            Ok(cmd) => cmd,
            Err(err) => {
                log::error!("invoke_capture2: {}", err);
                return ("ERROR".to_string(), LOCAL_ERROR_UNCONFIGURED);
            }
        };
        let raw = self.run_shell(&cmd);
        if raw.code == 0 {
            self.trace_log(&format!("command successful, output:\n{}", raw.stdout));
            return (raw.stdout.trim().to_string(), 0);
        }
        let output = Self::failure_text(&cmd, &raw);
        self.trace_log(&format!(
            "invoke_capture2: command returned a nonzero (error) code: {}\n{}",
            raw.code, output
        ));
        (output, raw.code)
    }

    /// Call a program of the named driver under the standard layout
    /// `<root>/drivers/<driver>/<command...>`, where `command` carries the
    /// program name and its arguments. Returns `(combined text, status)`;
    /// an empty driver or command is rejected locally with the reserved
    /// codes, before any process is spawned.
    pub fn call_driver(&self, driver: &str, command: &str) -> (String, i32) {
        if driver.is_empty() {
            log::error!("call_driver: driver argument is empty");
            return ("ERROR".to_string(), LOCAL_ERROR_MISSING_ARGUMENT);
        }
        if command.is_empty() {
            log::error!("call_driver: command argument is empty");
            return ("ERROR".to_string(), LOCAL_ERROR_MISSING_COMMAND);
        }
        let cmd = format!(
            "{}/{}",
            self.root_dir.join("drivers").join(driver).display(),
            command
        );
        let raw = self.run_shell(&cmd);
        if raw.code == 0 {
            self.trace_log(&format!("command successful, output:\n{}", raw.stdout));
            return (raw.stdout, 0);
        }
        self.trace_log(&format!(
            "call_driver: command returned a nonzero (error) code: {}\nstdout:\n{}\nstderr:\n{}",
            raw.code, raw.stdout, raw.stderr
        ));
        (Self::failure_text(&cmd, &raw), raw.code)
    }
}
