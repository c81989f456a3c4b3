//! Connection handle abstraction.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use redpool_core::result::AppResult;

use super::name::ConnectionName;
use super::status::ConnectionStatus;

/// A live client session managed by the registry.
///
/// The registry entry owns the handle; consumers borrow `Arc` clones to
/// issue commands but never drive the lifecycle themselves. Shutdown is
/// the coordinator's job.
#[async_trait]
pub trait ManagedConnection: Send + Sync + fmt::Debug + 'static {
    /// Name under which this connection was registered.
    fn name(&self) -> &ConnectionName;

    /// Current lifecycle status. Must not block.
    fn status(&self) -> ConnectionStatus;

    /// Initiate a graceful close, allowing in-flight operations to drain.
    ///
    /// Completion of the close is observed through [`status`] reaching
    /// [`ConnectionStatus::End`], not through this future resolving.
    ///
    /// [`status`]: ManagedConnection::status
    async fn close(&self) -> AppResult<()>;
}

/// Shared reference to a managed connection.
pub type SharedConnection = Arc<dyn ManagedConnection>;
