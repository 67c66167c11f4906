//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "AUTHGRAPH_LOG";

static INIT: Once = Once::new();

/// Initialize logging.
///
/// Reads `AUTHGRAPH_LOG` for per-crate log levels, e.g.
/// `AUTHGRAPH_LOG=authgraph_pipeline=debug,authgraph_storage=warn`.
/// Falls back to `authgraph=info` if unset or invalid.
///
/// Idempotent: later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("authgraph=info"));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .try_init();
    });
}
