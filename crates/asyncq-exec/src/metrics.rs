//! Tracing hooks for operator execution.
//!
//! Without the `tracing` feature these compile to no-ops, so the library
//! carries no telemetry dependency by default. The binary layer installs a
//! subscriber.

use asyncq_core::error::Error;

#[cfg(feature = "tracing")]
pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::trace_span!("asyncq", op = event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%k, %v, "operator");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_span(_event: &str, _key_values: &[(&str, String)]) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn emit_failure(event: &str, err: &Error) {
    if err.is_canceled() {
        tracing::debug!(op = event, "canceled before the source was resolved");
    } else {
        tracing::debug!(op = event, error = %err, "operator failed");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_failure(_event: &str, _err: &Error) { /* no-op */
}
