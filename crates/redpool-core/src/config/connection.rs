//! Per-connection configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a single named Redis connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Optional connection identifier. When omitted, the connection is
    /// registered under the well-known `"default"` name.
    #[serde(default)]
    pub name: Option<String>,
    /// Redis connection URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Delay between establishment attempts while the connection is still
    /// `connecting`, in milliseconds.
    #[serde(default = "default_retry_interval")]
    pub connect_retry_interval_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            name: None,
            url: default_url(),
            connect_retry_interval_ms: default_retry_interval(),
        }
    }
}

fn default_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_retry_interval() -> u64 {
    500
}
