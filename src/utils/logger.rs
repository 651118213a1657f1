//! Logging utilities
//!
//! Configures the tracing subscriber. Diagnostics always go to stderr:
//! stdout carries nothing but captured test output and the summary line.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize the logger.
///
/// `RUST_LOG` takes precedence when set; otherwise the level defaults
/// to warn, or debug with `--verbose`.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("partest={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
