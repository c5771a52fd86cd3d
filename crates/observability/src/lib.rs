//! Process-wide tracing setup for stockcast binaries.

/// Initialize tracing/logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
