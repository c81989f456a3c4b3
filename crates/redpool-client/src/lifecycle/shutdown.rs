//! Sequential graceful shutdown across all registered connections.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use redpool_core::error::AppError;

use crate::connection::name::ConnectionName;
use crate::connection::status::ConnectionStatus;
use crate::registry::ConnectionRegistry;

use super::waiter::{WaitPolicy, wait_for_status};

/// Which wait timed out during a connection's drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownStage {
    /// Waiting for `ready` before issuing the close.
    AwaitReady,
    /// Waiting for `end` after the close.
    AwaitEnd,
}

impl fmt::Display for ShutdownStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitReady => write!(f, "ready-wait"),
            Self::AwaitEnd => write!(f, "end-wait"),
        }
    }
}

/// A single connection that failed to drain in time.
#[derive(Debug, Error)]
#[error("connection '{name}' timed out during {stage}")]
pub struct ShutdownFailure {
    /// Name of the connection that failed.
    pub name: ConnectionName,
    /// The wait that timed out.
    pub stage: ShutdownStage,
    /// The underlying timeout error.
    #[source]
    pub source: AppError,
}

/// Aggregate of every drain failure from a shutdown pass.
///
/// The caller decides whether this is fatal to process exit; no failure
/// is ever dropped silently.
#[derive(Debug)]
pub struct ShutdownErrors {
    /// All recorded failures, in drain order.
    pub failures: Vec<ShutdownFailure>,
}

impl fmt::Display for ShutdownErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} connection(s) failed to shut down cleanly: ",
            self.failures.len()
        )?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ShutdownErrors {}

/// Drives the registry through an ordered, sequential drain.
///
/// Connections are drained one at a time in registration order; one
/// connection's full drain completes, success or failure, before the next
/// begins. The latency cost of the linear pass buys a single sequence with
/// no cross-connection interleaving.
#[derive(Debug, Clone, Default)]
pub struct ShutdownCoordinator {
    policy: WaitPolicy,
}

impl ShutdownCoordinator {
    /// Create a coordinator with an explicit wait policy.
    pub fn new(policy: WaitPolicy) -> Self {
        Self { policy }
    }

    /// Drain every registered connection: wait for `ready`, close, wait
    /// for `end`.
    ///
    /// A timeout on either wait is recorded and the drain continues — the
    /// remaining steps for that connection are still attempted, and every
    /// subsequent connection is still drained. A misbehaving connection
    /// must not strand the others open. All recorded failures are returned
    /// together after the full pass.
    pub async fn shutdown_all(&self, registry: &ConnectionRegistry) -> Result<(), ShutdownErrors> {
        let names = registry.names();
        info!(count = names.len(), "Draining registered connections");

        let mut failures = Vec::new();
        for name in names {
            let conn = match registry.lookup(&name) {
                Ok(conn) => conn,
                Err(_) => {
                    // Registration order and the map only diverge if a
                    // caller mutates the registry mid-drain.
                    warn!(name = %name, "Registered name missing during drain, skipping");
                    continue;
                }
            };

            // A quit issued while still connecting is rejected or
            // undefined in the underlying client, so gate on ready first.
            if let Err(e) =
                wait_for_status(conn.as_ref(), ConnectionStatus::Ready, &self.policy).await
            {
                warn!(name = %name, error = %e, "Connection never became ready before close");
                failures.push(ShutdownFailure {
                    name: name.clone(),
                    stage: ShutdownStage::AwaitReady,
                    source: e,
                });
            }

            if let Err(e) = conn.close().await {
                warn!(name = %name, error = %e, "Graceful close reported an error");
            }

            if let Err(e) =
                wait_for_status(conn.as_ref(), ConnectionStatus::End, &self.policy).await
            {
                warn!(name = %name, error = %e, "Connection did not reach end after close");
                failures.push(ShutdownFailure {
                    name: name.clone(),
                    stage: ShutdownStage::AwaitEnd,
                    source: e,
                });
            } else {
                info!(name = %name, "Connection drained");
            }
        }

        if failures.is_empty() {
            info!("All connections shut down cleanly");
            Ok(())
        } else {
            warn!(count = failures.len(), "Shutdown completed with failures");
            Err(ShutdownErrors { failures })
        }
    }
}
