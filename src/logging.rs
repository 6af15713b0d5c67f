//! Log subscriber setup for the command-line tool.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// Installs a stderr fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_level` for targets without a directive.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init(default_level: LevelFilter) -> Result<(), TryInitError> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
}
