//! Tracing setup.
//!
//! Filtering follows `RUST_LOG` when set. Output goes to stderr so `--json`
//! reports on stdout stay machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "wavmosh=info";

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str = "wavmosh=debug";

/// Installs the global subscriber for the binary.
///
/// `--verbose` overrides `RUST_LOG`. A second call is a no-op.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Installs a subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs.
#[cfg(test)]
pub fn init_test_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wavmosh=warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_test_writer()
        .try_init();
}
