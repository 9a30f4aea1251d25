use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

thread_local! {
    static STATE: RefCell<BTreeMap<&'static str, EntityMetrics>> =
        RefCell::new(BTreeMap::new());
}

///
/// EntityMetrics
///
/// Per-entity execution counters.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EntityMetrics {
    pub loads: u64,
    pub rows_scanned: u64,
    pub rows_returned: u64,
}

///
/// MetricsReport
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct MetricsReport {
    pub entities: BTreeMap<&'static str, EntityMetrics>,
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut BTreeMap<&'static str, EntityMetrics>) -> R) -> R {
    STATE.with_borrow_mut(f)
}

pub(crate) fn report() -> MetricsReport {
    STATE.with_borrow(|state| MetricsReport {
        entities: state.clone(),
    })
}

pub(crate) fn reset_all() {
    STATE.with_borrow_mut(BTreeMap::clear);
}
