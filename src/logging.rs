//! Tracing subscriber setup.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding `EnvFilter` directives.
pub const LOG_ENV: &str = "CYCLE_LOG";

static INIT: Once = Once::new();

/// Initialize logging to stderr.
///
/// Reads `CYCLE_LOG` (e.g. `CYCLE_LOG=cycle_forecast=debug`), falling back to
/// `cycle_forecast=info` when unset or invalid. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("cycle_forecast=info"));

        // `try_init` so a subscriber installed by an embedding process wins.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .try_init();
    });
}
