//! Tracing setup for test harnesses driving walks.
//!
//! Only built with the `telemetry` feature.

use tracing_subscriber::EnvFilter;

/// Install a test-friendly `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Output goes through the test
/// writer so it is captured per test. Returns `false` if a global
/// subscriber was already installed; calling this from every test is fine.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        let _ = init_tracing("odyssey=debug");
        assert!(!init_tracing("odyssey=debug"));
    }
}
