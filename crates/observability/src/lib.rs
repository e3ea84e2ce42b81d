//! Tracing/logging setup shared by every binary and test harness.

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&tracing::TracingConfig::from_env());
}

/// Initialize tracing for tests: human-readable, `debug` and up, captured by
/// the test harness.
pub fn init_for_tests() {
    tracing::init_for_tests();
}

/// Tracing configuration (filters, output format).
pub mod tracing;
