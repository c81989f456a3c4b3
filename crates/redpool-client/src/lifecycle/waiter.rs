//! Bounded status polling.

use std::time::Duration;

use tokio::time::sleep;
use tracing::trace;

use redpool_core::config::shutdown::ShutdownConfig;
use redpool_core::error::AppError;
use redpool_core::result::AppResult;

use crate::connection::handle::ManagedConnection;
use crate::connection::status::ConnectionStatus;

/// Poll interval and attempt bound for a status wait.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    /// Interval between status polls.
    pub poll_interval: Duration,
    /// Number of polls before the wait is reported as timed out.
    pub max_attempts: u32,
}

impl WaitPolicy {
    /// Create a policy with an explicit interval and attempt bound.
    pub fn new(poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            poll_interval,
            max_attempts,
        }
    }
}

impl Default for WaitPolicy {
    /// Default drain budget: 200ms x 15 attempts, roughly three seconds.
    fn default() -> Self {
        Self::new(Duration::from_millis(200), 15)
    }
}

impl From<&ShutdownConfig> for WaitPolicy {
    fn from(config: &ShutdownConfig) -> Self {
        Self::new(
            Duration::from_millis(config.poll_interval_ms),
            config.max_attempts,
        )
    }
}

/// Wait until `conn` reports `target`, polling at the policy's interval.
///
/// Returns immediately, without sleeping, when the status already matches.
/// Fails with a `Timeout` error once `max_attempts` polls have elapsed
/// without observing the target. Only the calling task suspends during the
/// poll sleeps. This is a deliberate bounded poll rather than an event
/// subscription: the underlying client does not guarantee a notification
/// for every status change.
pub async fn wait_for_status(
    conn: &dyn ManagedConnection,
    target: ConnectionStatus,
    policy: &WaitPolicy,
) -> AppResult<()> {
    let mut attempts = 0u32;
    while conn.status() != target {
        if attempts >= policy.max_attempts {
            return Err(AppError::timeout(format!(
                "Connection '{}' never reached status '{}' after {} polls",
                conn.name(),
                target,
                attempts
            )));
        }
        attempts += 1;
        trace!(
            name = %conn.name(),
            target = %target,
            attempts,
            "Target status not reached yet, polling"
        );
        sleep(policy.poll_interval).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::fake::FakeConnection;
    use redpool_core::error::ErrorKind;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_wait_is_noop_when_already_at_target() {
        let conn = FakeConnection::new("a", ConnectionStatus::Ready);
        let start = Instant::now();

        wait_for_status(conn.as_ref(), ConnectionStatus::Ready, &WaitPolicy::default())
            .await
            .unwrap();

        // Zero poll iterations: virtual time must not have advanced.
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out_after_bounded_attempts() {
        let conn = FakeConnection::new("a", ConnectionStatus::Connecting);
        let start = Instant::now();

        let err = wait_for_status(conn.as_ref(), ConnectionStatus::Ready, &WaitPolicy::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Timeout);
        // Exactly 15 polls at 200ms each, not earlier, not indefinitely.
        assert_eq!(start.elapsed(), Duration::from_millis(15 * 200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_observes_late_transition() {
        let conn = FakeConnection::new("a", ConnectionStatus::Connecting);
        conn.transition_after(ConnectionStatus::Ready, Duration::from_millis(500));

        wait_for_status(conn.as_ref(), ConnectionStatus::Ready, &WaitPolicy::default())
            .await
            .unwrap();

        assert_eq!(conn.status(), ConnectionStatus::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_policy_from_shutdown_config() {
        let config = ShutdownConfig {
            poll_interval_ms: 50,
            max_attempts: 2,
        };
        let policy = WaitPolicy::from(&config);
        let conn = FakeConnection::new("a", ConnectionStatus::Connecting);
        let start = Instant::now();

        let err = wait_for_status(conn.as_ref(), ConnectionStatus::Ready, &policy)
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Timeout);
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }
}
