//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! This module does not access storage internals directly; the query layer
//! reports execution events through the sink boundary only.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityMetrics, MetricsReport};
pub use sink::{MetricsEvent, MetricsSink, record};

/// Build a point-in-time metrics report.
#[must_use]
pub fn metrics_report() -> MetricsReport {
    metrics::report()
}

/// Reset all metrics counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}
