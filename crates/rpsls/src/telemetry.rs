//! Tracing setup for binaries embedding the game core.

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `default_directive` (for example `"info"` or
/// `"rpsls_round=debug"`) when `RUST_LOG` is unset or unparsable. Logs go to
/// stderr so they never interleave with a terminal UI on stdout.
///
/// Returns `false` if a global subscriber was already installed; calling
/// this more than once is harmless.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
