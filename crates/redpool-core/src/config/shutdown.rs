//! Shutdown drain configuration.

use serde::{Deserialize, Serialize};

/// Bounded-wait settings used when draining connections at teardown.
///
/// The defaults give each status wait a budget of roughly three seconds
/// (200ms x 15 attempts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// Interval between status polls in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Number of polls before a wait is reported as timed out.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_poll_interval() -> u64 {
    200
}

fn default_max_attempts() -> u32 {
    15
}
