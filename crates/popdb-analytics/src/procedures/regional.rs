//! Per-region rollup of population and economic aggregates, computed live
//! from member countries rather than from the cached region fields.

use crate::{AnalyticsError, AnalyticsSession, SnapshotPolicy, snapshot_map};
use popdb_core::num::{pooled_mean, sum_present};
use popdb_schema::RegionType;
use serde::Serialize;

///
/// RegionalAnalysisRow
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalAnalysisRow {
    pub name: String,
    #[serde(rename = "type")]
    pub region_type: RegionType,
    pub country_count: u32,
    pub total_population_2025: u64,
    pub total_population_2050: u64,
    pub avg_density: Option<f64>,
    pub avg_growth_rate: Option<f64>,
    pub avg_gdp_per_capita: Option<f64>,
    pub avg_life_expectancy: Option<f64>,
    pub avg_urbanization: Option<f64>,
    pub total_gdp: f64,
    pub projected_growth: i64,
}

impl AnalyticsSession<'_> {
    /// Every region with live member joins, most populous first.
    ///
    /// Dangling member codes contribute nothing and cause no error; a region
    /// with zero resolvable members comes back with zero/null aggregates.
    pub fn regional_analysis(&self) -> Result<Vec<RegionalAnalysisRow>, AnalyticsError> {
        let snapshots = snapshot_map(self.db(), SnapshotPolicy::MostRecent);
        let regions = self.db().regions().query().entities()?;

        let mut rows: Vec<RegionalAnalysisRow> = regions
            .iter()
            .map(|region| {
                let members: Vec<_> = region
                    .countries
                    .iter()
                    .filter_map(|code| self.db().country(code))
                    .collect();
                // the snapshot join keys off membership, not off country existence
                let snaps: Vec<_> = region
                    .countries
                    .iter()
                    .filter_map(|code| snapshots.get(code.as_str()).copied())
                    .collect();

                let total_population_2025: u64 =
                    members.iter().filter_map(|c| c.pop2025).sum();
                let total_population_2050: u64 =
                    members.iter().filter_map(|c| c.pop2050).sum();

                RegionalAnalysisRow {
                    name: region.name.clone(),
                    region_type: region.region_type,
                    country_count: region.countries.len() as u32,
                    total_population_2025,
                    total_population_2050,
                    avg_density: pooled_mean(members.iter().map(|c| c.density)),
                    avg_growth_rate: pooled_mean(members.iter().map(|c| c.growth_rate)),
                    avg_gdp_per_capita: pooled_mean(snaps.iter().map(|s| s.gdp_per_capita)),
                    avg_life_expectancy: pooled_mean(snaps.iter().map(|s| s.life_expectancy)),
                    avg_urbanization: pooled_mean(snaps.iter().map(|s| s.urbanization_rate)),
                    total_gdp: sum_present(snaps.iter().map(|s| s.gdp_total)),
                    projected_growth: total_population_2050 as i64 - total_population_2025 as i64,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.total_population_2025.cmp(&a.total_population_2025));
        Ok(rows)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::world;
    use crate::AnalyticsSession;
    use popdb_schema::{Country, Region, StatsDb};

    #[test]
    fn regions_sort_by_population_descending() {
        let db = world();
        let rows = AnalyticsSession::new(&db).regional_analysis().unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["South", "Betazone", "Southland", "North", "Ghost"]);
    }

    #[test]
    fn sums_cover_exactly_the_resolvable_members() {
        let db = world();
        let rows = AnalyticsSession::new(&db).regional_analysis().unwrap();

        let north = rows.iter().find(|r| r.name == "North").unwrap();
        // EEE has null populations; it contributes nothing to either sum
        assert_eq!(north.total_population_2025, 300);
        assert_eq!(north.total_population_2050, 330);
        assert_eq!(north.projected_growth, 30);
        assert_eq!(north.country_count, 3);
        assert_eq!(north.avg_density, Some(205.0));
        assert_eq!(north.avg_growth_rate, Some(0.02));
    }

    #[test]
    fn economic_averages_pool_over_present_snapshots() {
        let db = world();
        let rows = AnalyticsSession::new(&db).regional_analysis().unwrap();

        let north = rows.iter().find(|r| r.name == "North").unwrap();
        // AAA's 2024 row and BBB's 2024 row; EEE has no snapshot
        assert_eq!(north.avg_gdp_per_capita, Some(6_000.0));
        assert_eq!(north.avg_life_expectancy, Some(68.0));
        assert_eq!(north.avg_urbanization, Some(47.5));
        assert_eq!(north.total_gdp, 1.4);

        let south = rows.iter().find(|r| r.name == "South").unwrap();
        // DDD has no indicator rows at all; CCC + FFF(2023) remain
        assert_eq!(south.avg_gdp_per_capita, Some(21_500.0));
    }

    #[test]
    fn dangling_codes_are_skipped_not_fatal() {
        let db = world();
        let rows = AnalyticsSession::new(&db).regional_analysis().unwrap();

        let southland = rows.iter().find(|r| r.name == "Southland").unwrap();
        assert_eq!(southland.country_count, 3); // XXX still counts as membership
        assert_eq!(southland.total_population_2025, 350);
        assert_eq!(southland.avg_density, Some(260.0));
    }

    #[test]
    fn empty_region_yields_zero_and_null_aggregates() {
        let db = world();
        let rows = AnalyticsSession::new(&db).regional_analysis().unwrap();

        let ghost = rows.iter().find(|r| r.name == "Ghost").unwrap();
        assert_eq!(ghost.total_population_2025, 0);
        assert_eq!(ghost.avg_density, None);
        assert_eq!(ghost.avg_gdp_per_capita, None);
        assert_eq!(ghost.total_gdp, 0.0);
        assert_eq!(ghost.projected_growth, 0);
    }

    #[test]
    fn partial_member_scenario_pools_over_one_value() {
        let mut db = StatsDb::new();
        db.insert_country(Country {
            pop2025: Some(10),
            density: Some(5.0),
            ..Country::new("XAA", "XA", "Exland")
        });
        db.insert_region(Region::new("R", popdb_schema::RegionType::Subregion, ["XAA", "YBB"]));

        let rows = AnalyticsSession::new(&db).regional_analysis().unwrap();
        assert_eq!(rows[0].total_population_2025, 10);
        assert_eq!(rows[0].avg_density, Some(5.0));
    }
}
