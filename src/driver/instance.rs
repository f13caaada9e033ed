// File: src/driver/instance.rs
//
// Node Instance Lifecycle
//
// One-time setup/teardown of a running node instance around the client
// session. Setup starts an instance through the node driver under a unique
// label, resolves the label to the network port the driver assigned, and
// points the session URL at the derived web port. Teardown clears the
// instance by port.

use crate::driver::session::ClientSession;
use crate::error::{HarnessError, Result};

/// Driver that starts, finds and clears node instances
pub const DEFAULT_NODE_DRIVER: &str = "hotstart";

/// Driver whose working directory provides the client wallet
pub const DEFAULT_CLIENT_PROVIDER: &str = "cleos-driver";

/// Driver invariant: the web (RPC) port is the network port plus this offset.
pub const WEB_PORT_OFFSET: u16 = 10000;

/// A node instance started by `setup`, identified by its assigned ports.
#[derive(Debug, Clone)]
pub struct NodeInstance {
    /// Unique label the instance was started under
    pub label: String,
    /// Network (P2P) port assigned by the driver
    pub port: u16,
    /// Derived web port the session URL points at
    pub web_port: u16,
}

/// Bind the session to `provider`, start a node instance through
/// `node_driver` with the given extra start arguments, and point the
/// session URL at the instance. Every step logs on failure and
/// short-circuits.
pub fn setup(
    session: &mut ClientSession,
    node_driver: &str,
    provider: &str,
    start_args: &str,
) -> Result<NodeInstance> {
    log::info!(
        "setup: setting up test environment, start_args: '{}'",
        start_args
    );

    session.set_provider(provider)?;

    // Unique label for this run's instance
    let label = format!("{}_{:08x}", std::process::id(), rand::random::<u32>());
    log::debug!("setup: generated instance label: {}", label);

    let start = format!("start --label '{}' {}", label, start_args)
        .trim()
        .to_string();
    let (out, ret) = session.call_driver(node_driver, &start);
    if ret != 0 {
        log::error!("setup: {} '{}' failed: {}", node_driver, start, out);
        return Err(HarnessError::ProcessFailure {
            code: ret,
            output: out,
        });
    }

    // Resolve which port the driver gave this label
    let find = format!("findinstance {}", label);
    let (out, ret) = session.call_driver(node_driver, &find);
    if ret != 0 {
        log::error!("setup: {} '{}' failed: {}", node_driver, find, out);
        return Err(HarnessError::ProcessFailure {
            code: ret,
            output: out,
        });
    }
    let port: u16 = out.trim().parse().map_err(|_| {
        log::error!("setup: cannot parse instance port from '{}'", out.trim());
        HarnessError::runtime_unlocated(format!(
            "cannot parse instance port from '{}'",
            out.trim()
        ))
    })?;

    // The driver can hand out any u16 port, so the offset can push the
    // derived port past the valid range.
    let derived = u32::from(port) + u32::from(WEB_PORT_OFFSET);
    let web_port = u16::try_from(derived).map_err(|_| {
        log::error!(
            "setup: derived web port {} exceeds the valid port range",
            derived
        );
        HarnessError::runtime_unlocated(format!(
            "derived web port {} exceeds the valid port range",
            derived
        ))
    })?;
    session.set_url(&format!("http://127.0.0.1:{}", web_port));

    log::info!("setup: OK (port {}, web port {})", port, web_port);
    Ok(NodeInstance {
        label,
        port,
        web_port,
    })
}

/// Stop and wipe the instance recorded by `setup`.
///
/// Calling this without a recorded instance is a fatal misuse (setup was
/// never run): it terminates the process with exit code 1, as does a failed
/// clear command.
pub fn teardown(session: &ClientSession, node_driver: &str, instance: Option<&NodeInstance>) {
    log::info!("teardown: starting cleanup...");
    let Some(instance) = instance else {
        log::error!("teardown: no recorded instance port; setup was likely never called");
        std::process::exit(1);
    };

    let clear = format!("clearinstance --port {}", instance.port);
    let (out, ret) = session.call_driver(node_driver, &clear);
    if ret != 0 {
        log::error!("teardown: {} '{}' failed: {}", node_driver, clear, out);
        std::process::exit(1);
    }
    log::info!("teardown: cleanup OK");
}
