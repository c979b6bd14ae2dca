//! Test logging setup.

use tracing_subscriber::EnvFilter;

/// Install a test-friendly `tracing` subscriber.
///
/// Output goes through the test writer, so it is captured per test. Safe
/// to call from every test; only the first call installs anything.
pub fn init_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Install test logging at `warn`.
pub fn init_test_logging_default() {
    init_test_logging("warn");
}
