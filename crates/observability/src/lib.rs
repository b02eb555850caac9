//! Process-wide tracing setup shared by binaries and integration tests.

/// Tracing configuration (filters, formatting).
pub mod tracing;

/// Initialize tracing for the process.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
