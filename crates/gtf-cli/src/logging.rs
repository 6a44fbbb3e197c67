//! Logging setup

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log` nor `RUST_LOG` is given
pub const DEFAULT_FILTER: &str = "info";

/// Build the event filter: explicit filter, then `RUST_LOG`, then the default
pub fn env_filter(explicit: Option<&str>) -> anyhow::Result<EnvFilter> {
    match explicit {
        Some(filter) => EnvFilter::try_new(filter)
            .map_err(|e| anyhow::anyhow!("Invalid log filter {:?}: {}", filter, e)),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the global subscriber, writing to stderr
pub fn init(explicit: Option<&str>) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(explicit)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
