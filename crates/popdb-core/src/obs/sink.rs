//! Metrics sink boundary.
//!
//! Query execution MUST NOT depend on `obs::metrics` directly.
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`; this
//! module is the only bridge between execution logic and the counter state.

use crate::obs::metrics;

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    ExecStart {
        entity: &'static str,
    },
    ExecFinish {
        entity: &'static str,
        rows_returned: u64,
    },
    RowsScanned {
        entity: &'static str,
        rows_scanned: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
///
/// Default process-local sink that writes into the global counter state.
///

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { entity } => {
                metrics::with_state_mut(|state| {
                    state.entry(entity).or_default().loads += 1;
                });
            }
            MetricsEvent::ExecFinish {
                entity,
                rows_returned,
            } => {
                metrics::with_state_mut(|state| {
                    state.entry(entity).or_default().rows_returned += rows_returned;
                });
            }
            MetricsEvent::RowsScanned {
                entity,
                rows_scanned,
            } => {
                metrics::with_state_mut(|state| {
                    state.entry(entity).or_default().rows_scanned += rows_scanned;
                });
            }
        }
    }
}

/// Record one event into the active sink.
pub fn record(event: MetricsEvent) {
    GlobalMetricsSink.record(event);
}

///
/// TESTS
///
