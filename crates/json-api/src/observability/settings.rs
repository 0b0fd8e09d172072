//! Request logging knobs read on every request.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::telemetry::TelemetryConfig;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);
static TRACE_PARENT_PROPAGATION: AtomicBool = AtomicBool::new(false);

pub(super) fn apply(config: &TelemetryConfig) {
    SLOW_REQUEST_THRESHOLD_MS.store(config.slow_request_threshold_ms, Ordering::Relaxed);

    // Parents are only honoured while exporting.
    TRACE_PARENT_PROPAGATION.store(
        config.otel_enabled && config.trace_parent_propagation,
        Ordering::Relaxed,
    );
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed)
}

pub(super) fn trace_parent_propagation() -> bool {
    TRACE_PARENT_PROPAGATION.load(Ordering::Relaxed)
}
