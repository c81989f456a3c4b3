//! Tracing subscriber initialization.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::logging::LoggingConfig;

/// Initialize the global tracing subscriber from configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
/// Must be called at most once per process.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_with_default_config() {
        // The global subscriber can only be installed once per process;
        // this is the only test in the crate that installs it.
        init_logging(&LoggingConfig::default());
    }
}
