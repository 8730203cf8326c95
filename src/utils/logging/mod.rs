//! Logging setup and the structured error context layer.

pub mod error;

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// The filter string follows the `tracing_subscriber::EnvFilter` syntax and
/// is overridden by `RUST_LOG` when set. Safe to call once per process;
/// subsequent calls are ignored.
pub fn setup_logging(default_filter: &str) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_filter));

	let _ = fmt()
		.with_env_filter(filter)
		.with_target(true)
		.try_init();
}
