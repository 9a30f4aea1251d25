//! Analytical query layer for PopDB.
//!
//! Six multi-stage aggregation procedures join country, region, and
//! economic-indicator data into derived statistics documents, plus a small
//! whole-store summary. Every procedure is a stateless, side-effect-free
//! read, safe to re-run: two invocations against an unchanged store produce
//! identical documents.

mod config;
mod procedures;
mod snapshot;

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod tests_props;

pub use config::{AnalyticsConfig, OvercrowdingParams};
pub use procedures::{
    comparison::{EconomicLeaderRow, RegionalComparisonDoc, TopRegionRow, TypeGroup, TypeGroupRegion},
    correlation::{CorrelationDoc, CorrelationEntry, CorrelationInsights, CorrelationSummary, TopPerformers},
    high_growth::{HighGrowthCountry, HighGrowthDoc},
    overcrowding::OvercrowdingRow,
    projection::{ProjectionDoc, ProjectionRow, ProjectionSummary},
    regional::RegionalAnalysisRow,
    summary::CountrySummaryDoc,
};
pub use snapshot::{SnapshotPolicy, snapshot_for, snapshot_map};

use popdb_core::error::InternalError;
use popdb_schema::StatsDb;
use thiserror::Error as ThisError;

///
/// AnalyticsError
///
/// A procedure aborts on the first store/query failure and surfaces the
/// underlying message verbatim; procedures are read-only, so there is no
/// partial-failure state to recover and nothing is retried here.
///

#[derive(Debug, ThisError)]
pub enum AnalyticsError {
    #[error(transparent)]
    Store(#[from] InternalError),
}

///
/// AnalyticsSession
///
/// Read-bound facade over one `StatsDb`. One method per procedure; each
/// returns a serde document shaped for the query service to serialize as-is.
///

pub struct AnalyticsSession<'a> {
    db: &'a StatsDb,
    config: AnalyticsConfig,
}

impl<'a> AnalyticsSession<'a> {
    #[must_use]
    pub fn new(db: &'a StatsDb) -> Self {
        Self::with_config(db, AnalyticsConfig::default())
    }

    #[must_use]
    pub const fn with_config(db: &'a StatsDb, config: AnalyticsConfig) -> Self {
        Self { db, config }
    }

    #[must_use]
    pub const fn db(&self) -> &'a StatsDb {
        self.db
    }

    #[must_use]
    pub const fn config(&self) -> &AnalyticsConfig {
        &self.config
    }
}
