//! Scripted connection doubles for lifecycle tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use redpool_core::result::AppResult;

use super::handle::ManagedConnection;
use super::name::ConnectionName;
use super::status::{ConnectionStatus, StatusCell};

/// What `close()` does to the scripted status.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CloseBehavior {
    /// Transition straight to `end`.
    EndImmediately,
    /// Transition to `closing`, then `end` after the delay.
    EndAfter(Duration),
    /// Stay in `closing` forever.
    Hang,
}

/// Connection double with a scripted status and counted close calls.
#[derive(Debug)]
pub(crate) struct FakeConnection {
    name: ConnectionName,
    status: Arc<StatusCell>,
    close_behavior: CloseBehavior,
    close_calls: AtomicUsize,
}

impl FakeConnection {
    pub(crate) fn new(name: &str, initial: ConnectionStatus) -> Arc<Self> {
        Self::with_close_behavior(name, initial, CloseBehavior::EndImmediately)
    }

    pub(crate) fn with_close_behavior(
        name: &str,
        initial: ConnectionStatus,
        close_behavior: CloseBehavior,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: ConnectionName::new(name),
            status: Arc::new(StatusCell::new(initial)),
            close_behavior,
            close_calls: AtomicUsize::new(0),
        })
    }

    /// Schedule a status transition after a delay.
    pub(crate) fn transition_after(&self, status: ConnectionStatus, delay: Duration) {
        let cell = Arc::clone(&self.status);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            cell.store(status);
        });
    }

    pub(crate) fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ManagedConnection for FakeConnection {
    fn name(&self) -> &ConnectionName {
        &self.name
    }

    fn status(&self) -> ConnectionStatus {
        self.status.load()
    }

    async fn close(&self) -> AppResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        match self.close_behavior {
            CloseBehavior::EndImmediately => self.status.store(ConnectionStatus::End),
            CloseBehavior::EndAfter(delay) => {
                self.status.store(ConnectionStatus::Closing);
                self.transition_after(ConnectionStatus::End, delay);
            }
            CloseBehavior::Hang => self.status.store(ConnectionStatus::Closing),
        }
        Ok(())
    }
}
