//! Structured logging setup (§10).

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `CONCIERGE_LOG` environment variable for filtering; defaults
/// to `info` when unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("CONCIERGE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .init();
}

/// Initialize tracing with an explicit filter string, for tests or embedding
/// in another process that already owns the global subscriber.
pub fn init_tracing_with_filter(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .init();
}
