use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::TelemetryError;

/// Install a global `fmt` subscriber filtered by `filter` (`RUST_LOG` syntax).
///
/// # Errors
///
/// Returns `TelemetryError` if the filter does not parse or a global
/// subscriber is already installed.
pub fn init_tracing(filter: &str) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(filter)?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()?;
    Ok(())
}
