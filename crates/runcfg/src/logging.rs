//! Subscriber setup for the binary

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor `--log-level` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Build the filter: `RUST_LOG` wins over `fallback`
///
/// # Errors
/// Returns error if `fallback` is not a valid filter directive
pub fn env_filter(fallback: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .with_context(|| format!("invalid log level '{fallback}'"))
}

/// Install a stderr subscriber
///
/// Stdout stays reserved for `--dry-run` output.
///
/// # Errors
/// Returns error if the filter is invalid or a subscriber is already set
pub fn init(fallback: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(fallback)?)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .context("failed to install tracing subscriber")
}
