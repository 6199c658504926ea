//! Logger initialization shared by all binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the given binary gets
/// `default_level` and everything else stays at `warn`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let default_directives = format!("warn,{}={}", bin_name.replace('-', "_"), default_level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
