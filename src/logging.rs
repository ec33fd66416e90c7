//! Logging configuration for askdb.
//!
//! Logs go to stderr so they never mix with the answer on stdout.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging with an environment-driven filter.
///
/// `RUST_LOG` controls verbosity; the default is `warn` so a normal run
/// prints nothing but the step progress and the answer.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
