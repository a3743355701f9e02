//! Log subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Installs a global `tracing` subscriber writing to stderr.
///
/// Stdout is reserved for the run report, so logs never interleave with it.
/// Calling this more than once is harmless: later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
