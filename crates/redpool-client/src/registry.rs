//! Named connection registry.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use tracing::{debug, warn};

use redpool_core::config::RedpoolConfig;
use redpool_core::error::AppError;
use redpool_core::result::AppResult;

use crate::connection::handle::{ManagedConnection, SharedConnection};
use crate::connection::name::ConnectionName;
use crate::redis::client::RedisConnection;

/// Process-lifetime mapping from connection name to connection handle.
///
/// Populated at setup time as connections are declared, then read once,
/// sequentially, at shutdown. Registration is safe from any task, but the
/// registry is not designed for concurrent writers during the shutdown
/// read pass.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    /// Name → handle for direct lookup.
    by_name: DashMap<ConnectionName, SharedConnection>,
    /// Names in registration order, for deterministic shutdown.
    order: Mutex<Vec<ConnectionName>>,
}

impl ConnectionRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration, opening every declared
    /// connection in declaration order.
    ///
    /// Establishment happens in the background; handles start in
    /// `connecting` and become `ready` once their server responds.
    pub fn connect_all(config: &RedpoolConfig) -> AppResult<Self> {
        let registry = Self::new();
        for conn_config in &config.connections {
            let handle = RedisConnection::connect(conn_config)?;
            let name = handle.name().clone();
            registry.register(name, handle);
        }
        Ok(registry)
    }

    /// Registers a connection under a name.
    ///
    /// Re-registering an existing name replaces the handle but keeps the
    /// name's original position in the shutdown order. This is treated as
    /// a caller error and logged; the previous handle is dropped without
    /// being closed.
    pub fn register(&self, name: ConnectionName, handle: SharedConnection) {
        let replaced = self.by_name.insert(name.clone(), handle).is_some();
        if replaced {
            warn!(name = %name, "Connection name re-registered, replacing existing handle");
        } else {
            self.order_lock().push(name.clone());
            debug!(name = %name, token = %name.token(), "Connection registered");
        }
    }

    /// Looks up a connection by name.
    ///
    /// Returns a `NotFound` error for names that were never registered,
    /// never a silently absent handle.
    pub fn lookup(&self, name: &ConnectionName) -> AppResult<SharedConnection> {
        self.by_name
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                AppError::not_found(format!("No connection registered under name '{name}'"))
            })
    }

    /// Checks whether a name is registered.
    pub fn contains(&self, name: &ConnectionName) -> bool {
        self.by_name.contains_key(name)
    }

    /// Returns all registered names in registration order,
    /// first-registered-first.
    pub fn names(&self) -> Vec<ConnectionName> {
        self.order_lock().clone()
    }

    /// Returns the number of registered connections.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if no connections are registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn order_lock(&self) -> MutexGuard<'_, Vec<ConnectionName>> {
        // Recover the list on poisoning; names are plain values.
        self.order.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::fake::FakeConnection;
    use crate::connection::status::ConnectionStatus;
    use redpool_core::error::ErrorKind;

    fn registry_with(names: &[&str]) -> ConnectionRegistry {
        let registry = ConnectionRegistry::new();
        for name in names {
            let conn = FakeConnection::new(name, ConnectionStatus::Ready);
            registry.register(ConnectionName::new(*name), conn);
        }
        registry
    }

    #[tokio::test]
    async fn test_names_preserve_registration_order() {
        let registry = registry_with(&["a", "b", "c"]);
        let names = registry.names();
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_lookup_miss_is_not_found() {
        let registry = registry_with(&["a"]);
        let err = registry
            .lookup(&ConnectionName::new("nonexistent"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_returns_registered_handle() {
        let registry = registry_with(&["sessions"]);
        let handle = registry.lookup(&ConnectionName::new("sessions")).unwrap();
        assert_eq!(handle.name().as_str(), "sessions");
    }

    #[tokio::test]
    async fn test_duplicate_name_replaces_but_keeps_order_slot() {
        let registry = registry_with(&["a", "b"]);
        let replacement = FakeConnection::new("a", ConnectionStatus::Connecting);
        registry.register(ConnectionName::new("a"), replacement);

        assert_eq!(registry.len(), 2);
        let names = registry.names();
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["a", "b"]);

        let handle = registry.lookup(&ConnectionName::new("a")).unwrap();
        assert_eq!(handle.status(), ConnectionStatus::Connecting);
    }

    #[tokio::test]
    async fn test_len_and_contains() {
        let registry = registry_with(&["a", "b"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert!(registry.contains(&ConnectionName::new("a")));
        assert!(!registry.contains(&ConnectionName::new("z")));
    }
}
