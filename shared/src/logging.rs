//! Tracing setup shared by the client library and its binaries

use tracing::{error, info};

/// Default level used when none is given on the command line or in `RUST_LOG`
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter directive for the reporting crates
pub fn filter_directive(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    format!("rp_client={base_level},rp_probe={base_level},rp_shared={base_level},reqwest=warn,hyper=warn")
}

/// Initialize tracing subscriber with an optional log level
///
/// `RUST_LOG` wins over the computed directive when it is set.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level)));

    // try_init so tests and embedding harnesses that already installed a subscriber keep theirs
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Initialize tracing subscriber at the default level
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Contextual logging helper for failed remote operations
pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    error!(error = %error, "❌ {} failed: {}", context, error);
}

/// Contextual logging helper for success conditions
pub fn log_success(message: &str) {
    info!("✅ {}", message);
}
