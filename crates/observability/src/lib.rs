//! Process-wide logging setup for the museum catalogue.

/// Initialize process-wide tracing from `RUST_LOG` (default `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

pub use self::tracing::init_with_filter;

/// Tracing configuration (filters, layers).
pub mod tracing;
