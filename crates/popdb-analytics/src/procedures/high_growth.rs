//! Countries growing faster than the global average, joined with their most
//! recent economic snapshot.

use crate::{AnalyticsError, AnalyticsSession, SnapshotPolicy, snapshot_map};
use popdb_core::db::Predicate;
use popdb_schema::{Country, EconomicIndicator};
use serde::Serialize;

/// Ranked output never exceeds this many countries.
const MAX_RESULTS: u32 = 20;

///
/// HighGrowthDoc
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighGrowthDoc {
    pub avg_growth_rate: f64,
    pub high_growth_countries: Vec<HighGrowthCountry>,
}

///
/// HighGrowthCountry
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighGrowthCountry {
    pub name: String,
    pub cca3: String,
    pub growth_rate: Option<f64>,
    pub pop2025: Option<u64>,
    pub pop2050: Option<u64>,
    pub economics: Option<EconomicIndicator>,
}

impl HighGrowthCountry {
    fn join(country: &Country, economics: Option<&EconomicIndicator>) -> Self {
        Self {
            name: country.name.clone(),
            cca3: country.cca3.clone(),
            growth_rate: country.growth_rate,
            pop2025: country.pop2025,
            pop2050: country.pop2050,
            economics: economics.cloned(),
        }
    }
}

impl AnalyticsSession<'_> {
    /// Mean growth rate, then every country strictly above it, newest
    /// economic snapshot attached, fastest growers first.
    ///
    /// If no country exceeds the mean the list is empty, not an error.
    pub fn high_growth_with_economics(&self) -> Result<HighGrowthDoc, AnalyticsError> {
        let avg_growth_rate = self
            .db()
            .countries()
            .query()
            .avg_by("growth_rate")?
            .unwrap_or(0.0);

        let fast = self
            .db()
            .countries()
            .query()
            .filter(Predicate::gt("growth_rate", avg_growth_rate))
            .order_by_desc("growth_rate")
            .limit(MAX_RESULTS)
            .entities()?;

        let snapshots = snapshot_map(self.db(), SnapshotPolicy::MostRecent);
        let high_growth_countries = fast
            .iter()
            .map(|country| {
                HighGrowthCountry::join(country, snapshots.get(country.cca3.as_str()).copied())
            })
            .collect();

        Ok(HighGrowthDoc {
            avg_growth_rate,
            high_growth_countries,
        })
    }
}

///
/// TESTS
///
