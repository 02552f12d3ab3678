// Shared setup for integration tests

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness.
///
/// Defaults to `info` for this crate; override with `RUST_LOG`. Safe to call
/// from every test: only the first call installs the subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("team_e2e=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
