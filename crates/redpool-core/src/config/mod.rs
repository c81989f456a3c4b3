//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod connection;
pub mod logging;
pub mod shutdown;

use serde::{Deserialize, Serialize};

use self::connection::ConnectionConfig;
use self::logging::LoggingConfig;
use self::shutdown::ShutdownConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedpoolConfig {
    /// Declared Redis connections, in the order they should be opened.
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
    /// Shutdown drain settings.
    #[serde(default)]
    pub shutdown: ShutdownConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RedpoolConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `REDPOOL_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("REDPOOL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
