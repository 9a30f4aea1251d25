//! Faceted regional comparison: three independent views computed from one
//! region/country/economy join.

use crate::{AnalyticsError, AnalyticsSession, SnapshotPolicy, snapshot_map};
use popdb_core::num::pooled_mean;
use popdb_schema::{EconomicIndicator, Region, RegionType, StatsDb};
use serde::Serialize;
use std::collections::BTreeMap;

/// Each ranked facet never exceeds this many regions.
const MAX_RANKED: usize = 10;

///
/// RegionalComparisonDoc
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalComparisonDoc {
    pub by_type: Vec<TypeGroup>,
    pub top_regions: Vec<TopRegionRow>,
    pub economic_leaders: Vec<EconomicLeaderRow>,
}

///
/// TypeGroup
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeGroup {
    #[serde(rename = "type")]
    pub region_type: RegionType,
    pub regions: Vec<TypeGroupRegion>,
    pub total_regions: u32,
    pub total_countries: u32,
    pub global_pop_2025: u64,
    pub global_pop_2050: u64,
}

///
/// TypeGroupRegion
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeGroupRegion {
    pub name: String,
    pub country_count: u32,
    pub total_pop_2025: u64,
    pub total_pop_2050: u64,
    pub avg_density: Option<f64>,
    pub avg_gdp: Option<f64>,
}

///
/// TopRegionRow
///
/// Restricted to subregions: continents are too coarse for a ranked view.
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRegionRow {
    pub name: String,
    #[serde(rename = "type")]
    pub region_type: RegionType,
    pub total_pop_2025: u64,
    pub total_pop_2050: u64,
    pub avg_density: Option<f64>,
    pub avg_gdp: Option<f64>,
    pub growth_rate: Option<f64>,
    pub projected_change: i64,
    pub projected_percent_change: Option<f64>,
}

///
/// EconomicLeaderRow
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicLeaderRow {
    pub name: String,
    #[serde(rename = "type")]
    pub region_type: RegionType,
    pub avg_gdp: Option<f64>,
    pub avg_life_expectancy: Option<f64>,
    pub country_count: u32,
}

///
/// RegionJoin
///
/// One region joined to its member countries and reference-year snapshots;
/// the shared base every facet projects from.
///

struct RegionJoin {
    name: String,
    region_type: RegionType,
    country_count: u32,
    total_pop_2025: u64,
    total_pop_2050: u64,
    avg_density: Option<f64>,
    avg_growth_rate: Option<f64>,
    avg_gdp: Option<f64>,
    avg_life_expectancy: Option<f64>,
}

impl RegionJoin {
    fn build(
        db: &StatsDb,
        region: &Region,
        snapshots: &BTreeMap<&str, &EconomicIndicator>,
    ) -> Self {
        let members: Vec<_> = region
            .countries
            .iter()
            .filter_map(|code| db.country(code))
            .collect();
        let snaps: Vec<_> = region
            .countries
            .iter()
            .filter_map(|code| snapshots.get(code.as_str()).copied())
            .collect();

        Self {
            name: region.name.clone(),
            region_type: region.region_type,
            country_count: region.countries.len() as u32,
            total_pop_2025: members.iter().filter_map(|c| c.pop2025).sum(),
            total_pop_2050: members.iter().filter_map(|c| c.pop2050).sum(),
            avg_density: pooled_mean(members.iter().map(|c| c.density)),
            avg_growth_rate: pooled_mean(members.iter().map(|c| c.growth_rate)),
            avg_gdp: pooled_mean(snaps.iter().map(|s| s.gdp_per_capita)),
            avg_life_expectancy: pooled_mean(snaps.iter().map(|s| s.life_expectancy)),
        }
    }
}

impl AnalyticsSession<'_> {
    /// One reference-year join per region, then three non-interacting facets:
    /// type-level grouping, the most populous subregions with projections,
    /// and the economic leaderboard across all region types.
    pub fn regional_comparison(&self) -> Result<RegionalComparisonDoc, AnalyticsError> {
        let snapshots = snapshot_map(
            self.db(),
            SnapshotPolicy::FixedYear(self.config().reference_year),
        );
        let regions = self.db().regions().query().entities()?;
        let joins: Vec<RegionJoin> = regions
            .iter()
            .map(|region| RegionJoin::build(self.db(), region, &snapshots))
            .collect();

        Ok(RegionalComparisonDoc {
            by_type: facet_by_type(&joins),
            top_regions: facet_top_regions(&joins),
            economic_leaders: facet_economic_leaders(&joins),
        })
    }
}

fn facet_by_type(joins: &[RegionJoin]) -> Vec<TypeGroup> {
    let mut grouped: BTreeMap<RegionType, Vec<&RegionJoin>> = BTreeMap::new();
    for join in joins {
        grouped.entry(join.region_type).or_default().push(join);
    }

    grouped
        .into_iter()
        .map(|(region_type, group)| TypeGroup {
            region_type,
            total_regions: group.len() as u32,
            total_countries: group.iter().map(|j| j.country_count).sum(),
            // sums-of-sums over the already-joined member populations
            global_pop_2025: group.iter().map(|j| j.total_pop_2025).sum(),
            global_pop_2050: group.iter().map(|j| j.total_pop_2050).sum(),
            regions: group
                .iter()
                .map(|j| TypeGroupRegion {
                    name: j.name.clone(),
                    country_count: j.country_count,
                    total_pop_2025: j.total_pop_2025,
                    total_pop_2050: j.total_pop_2050,
                    avg_density: j.avg_density,
                    avg_gdp: j.avg_gdp,
                })
                .collect(),
        })
        .collect()
}

fn facet_top_regions(joins: &[RegionJoin]) -> Vec<TopRegionRow> {
    let mut subregions: Vec<&RegionJoin> = joins
        .iter()
        .filter(|j| j.region_type == RegionType::Subregion)
        .collect();
    subregions.sort_by(|a, b| b.total_pop_2025.cmp(&a.total_pop_2025));

    subregions
        .into_iter()
        .take(MAX_RANKED)
        .map(|j| {
            let projected_change = j.total_pop_2050 as i64 - j.total_pop_2025 as i64;
            TopRegionRow {
                name: j.name.clone(),
                region_type: j.region_type,
                total_pop_2025: j.total_pop_2025,
                total_pop_2050: j.total_pop_2050,
                avg_density: j.avg_density,
                avg_gdp: j.avg_gdp,
                growth_rate: j.avg_growth_rate,
                projected_change,
                projected_percent_change: (j.total_pop_2025 > 0)
                    .then(|| projected_change as f64 / j.total_pop_2025 as f64 * 100.0),
            }
        })
        .collect()
}

fn facet_economic_leaders(joins: &[RegionJoin]) -> Vec<EconomicLeaderRow> {
    let mut ranked: Vec<&RegionJoin> = joins.iter().collect();
    // regions with no GDP data rank last
    ranked.sort_by(|a, b| {
        b.avg_gdp
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.avg_gdp.unwrap_or(f64::NEG_INFINITY))
    });

    ranked
        .into_iter()
        .take(MAX_RANKED)
        .map(|j| EconomicLeaderRow {
            name: j.name.clone(),
            region_type: j.region_type,
            avg_gdp: j.avg_gdp,
            avg_life_expectancy: j.avg_life_expectancy,
            country_count: j.country_count,
        })
        .collect()
}

///
/// TESTS
///
