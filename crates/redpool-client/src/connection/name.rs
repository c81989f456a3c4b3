//! Typed connection names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name used when no identifier is supplied in configuration.
pub const DEFAULT_CONNECTION_NAME: &str = "default";

/// Identifier under which a connection is registered.
///
/// Derived deterministically from the optional user-supplied identifier;
/// omitting it selects the well-known [`DEFAULT_CONNECTION_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionName(String);

impl ConnectionName {
    /// Create a name from an explicit identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create a name from an optional identifier, falling back to the
    /// default name when omitted.
    pub fn from_optional(name: Option<&str>) -> Self {
        match name {
            Some(n) => Self::new(n),
            None => Self::default(),
        }
    }

    /// The raw name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministic diagnostic token for this connection, stable across
    /// runs for a given name.
    pub fn token(&self) -> String {
        format!("redpool:connection:{}", self.0)
    }
}

impl Default for ConnectionName {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTION_NAME)
    }
}

impl fmt::Display for ConnectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectionName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ConnectionName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
