use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,sqlx=warn,tower_http=info";

/// `RUST_LOG` wins; e.g. `RUST_LOG=debug,sqlx=info` to see connection lifecycle.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize a compact human-readable subscriber for local runs.
/// - Respects `RUST_LOG` if set
/// - Writes to stdout
/// - Safe to call more than once; later calls are ignored
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize a JSON subscriber for the Lambda runtime.
/// CloudWatch stamps every line itself, so the timestamp is omitted and ANSI
/// colors are off.
pub fn init_logging_json() {
    // try_init: a subscriber installed earlier (tests, embedding) is left in place
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .json()
        .with_current_span(false)
        .with_writer(io::stdout)
        .try_init();
}
