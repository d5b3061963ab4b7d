//! One-time tracing setup for tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn";

/// Filter directive for tests: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn test_filter() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string())
}

/// Install a test-writer subscriber once per process.
///
/// Safe to call from every test and from `ctor` hooks; later calls are no-ops
/// and an already-installed global subscriber is left alone.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(EnvFilter::new(test_filter()))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
