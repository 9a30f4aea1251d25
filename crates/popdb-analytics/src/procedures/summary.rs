//! Whole-store country statistics, computed through the core aggregation
//! surface.

use crate::{AnalyticsError, AnalyticsSession};
use serde::Serialize;

///
/// CountrySummaryDoc
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummaryDoc {
    pub total_countries: u32,
    pub avg_density: Option<f64>,
    pub max_density: Option<f64>,
    pub min_density: Option<f64>,
    pub total_population: u64,
}

impl AnalyticsSession<'_> {
    /// Density spread and total 2025 population across every country.
    /// Null densities are excluded from the mean and the extremes.
    pub fn country_summary(&self) -> Result<CountrySummaryDoc, AnalyticsError> {
        let query = self.db().countries().query();

        Ok(CountrySummaryDoc {
            total_countries: query.count()?,
            avg_density: query.avg_by("density")?,
            max_density: query.max_value_by("density")?,
            min_density: query.min_value_by("density")?,
            total_population: query.sum_by("pop2025")? as u64,
        })
    }
}

///
/// TESTS
///
