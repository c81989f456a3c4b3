//! # redpool-client
//!
//! Named Redis connection registry with coordinated graceful shutdown.
//!
//! Connections are opened from configuration, registered under stable
//! names, and handed out as shared handles. At process teardown the
//! [`ShutdownCoordinator`] drains every registered connection in
//! registration order: wait until `ready`, send a graceful quit, wait
//! until `end`, each transition gated by a bounded status poll.

pub mod connection;
pub mod lifecycle;
pub mod redis;
pub mod registry;

pub use connection::handle::{ManagedConnection, SharedConnection};
pub use connection::name::ConnectionName;
pub use connection::status::ConnectionStatus;
pub use lifecycle::shutdown::{ShutdownCoordinator, ShutdownErrors, ShutdownFailure, ShutdownStage};
pub use lifecycle::waiter::{WaitPolicy, wait_for_status};
pub use registry::ConnectionRegistry;
