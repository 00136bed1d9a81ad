//! Tracing/logging setup shared by binaries.

mod tracing;

pub use crate::tracing::ObservabilityConfig;

/// Initialize process-wide logging as described by `config`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &ObservabilityConfig) {
    tracing::init(config);
}
