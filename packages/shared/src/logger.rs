//! Logging setup utilities for the Sharepad binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The library crate and the binary are both filtered at
/// `default_log_level`; `RUST_LOG` takes precedence when it is set.
///
/// # Arguments
///
/// * `library_name` - The package whose logs the binary wants (e.g., "sharepad-server")
/// * `binary_name` - The name of the binary (e.g., "sharepad-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use sharepad_shared::logger::setup_logger;
///
/// setup_logger("sharepad-server", "sharepad-server", "debug");
/// ```
pub fn setup_logger(library_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter(library_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(library_name: &str, binary_name: &str, default_log_level: &str) -> String {
    let library_target = library_name.replace('-', "_");
    let binary_target = binary_name.replace('-', "_");
    let mut directives = vec![format!("{}={}", library_target, default_log_level)];
    if binary_target != library_target {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }
    directives.push(format!("tower_http={}", default_log_level));
    directives.join(",")
}
