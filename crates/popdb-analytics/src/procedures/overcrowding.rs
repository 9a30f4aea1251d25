//! High-density countries whose economy lags (or whose economic data is
//! missing), flagged for the overcrowding view.

use crate::{AnalyticsError, AnalyticsSession, OvercrowdingParams, SnapshotPolicy, snapshot_map};
use popdb_core::db::Predicate;
use popdb_schema::{Country, EconomicIndicator};
use serde::Serialize;

/// Ranked output never exceeds this many countries.
const MAX_RESULTS: usize = 15;

///
/// OvercrowdingRow
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvercrowdingRow {
    pub name: String,
    pub cca3: String,
    pub density: Option<f64>,
    pub pop2025: Option<u64>,
    pub pop2050: Option<u64>,
    pub growth_rate: Option<f64>,
    pub world_percentage: Option<f64>,
    pub area: Option<f64>,
    pub land_area_km: Option<f64>,
    // primary indicators
    pub gdp_per_capita: Option<f64>,
    pub life_expectancy: Option<f64>,
    // secondary indicators, rendered when the primary ones are missing
    pub gdp_total: Option<f64>,
    pub gini_coefficient: Option<f64>,
    pub unemployment_rate: Option<f64>,
    pub urbanization_rate: Option<f64>,
    pub literacy_rate: Option<f64>,
    pub overcrowding_index: f64,
}

impl OvercrowdingRow {
    fn join(country: &Country, snapshot: Option<&EconomicIndicator>) -> Self {
        let gdp_per_capita = snapshot.and_then(|s| s.gdp_per_capita);

        Self {
            name: country.name.clone(),
            cca3: country.cca3.clone(),
            density: country.density,
            pop2025: country.pop2025,
            pop2050: country.pop2050,
            growth_rate: country.growth_rate,
            world_percentage: country.world_percentage,
            area: country.area,
            land_area_km: country.land_area_km,
            gdp_per_capita,
            life_expectancy: snapshot.and_then(|s| s.life_expectancy),
            gdp_total: snapshot.and_then(|s| s.gdp_total),
            gini_coefficient: snapshot.and_then(|s| s.gini_coefficient),
            unemployment_rate: snapshot.and_then(|s| s.unemployment_rate),
            urbanization_rate: snapshot.and_then(|s| s.urbanization_rate),
            literacy_rate: snapshot.and_then(|s| s.literacy_rate),
            // the one place a missing value becomes a sentinel: countries with
            // no reference-year data keep a numeric, comparable index
            overcrowding_index: country.density.unwrap_or(0.0) / gdp_per_capita.unwrap_or(1.0),
        }
    }
}

impl AnalyticsSession<'_> {
    /// Countries above the density threshold whose reference-year GDP per
    /// capita is below the threshold (or absent entirely), densest first.
    ///
    /// The join pins the configured reference year rather than taking each
    /// country's newest data, so every row describes the same period.
    pub fn overcrowding_analysis(
        &self,
        params: &OvercrowdingParams,
    ) -> Result<Vec<OvercrowdingRow>, AnalyticsError> {
        let dense = self
            .db()
            .countries()
            .query()
            .filter(Predicate::gt("density", params.density_threshold))
            .order_by_desc("density")
            .entities()?;

        let snapshots = snapshot_map(
            self.db(),
            SnapshotPolicy::FixedYear(self.config().reference_year),
        );

        let mut rows: Vec<OvercrowdingRow> = dense
            .iter()
            .filter(|country| {
                match snapshots.get(country.cca3.as_str()) {
                    // flagged: confirmed low GDP for the reference year
                    Some(snap) => snap
                        .gdp_per_capita
                        .is_some_and(|gdp| gdp < params.gdp_threshold),
                    // flagged: no reference-year data at all
                    None => true,
                }
            })
            .map(|country| {
                OvercrowdingRow::join(country, snapshots.get(country.cca3.as_str()).copied())
            })
            .collect();

        rows.truncate(MAX_RESULTS);
        Ok(rows)
    }
}

///
/// TESTS
///
