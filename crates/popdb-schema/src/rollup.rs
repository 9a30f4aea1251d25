//! Batch recompute of the cached per-region rollup fields.
//!
//! The live aggregation path never reads these caches; they exist for
//! consumers that want region records to be self-describing without running
//! an analytical query.

use crate::{Country, StatsDb};
use popdb_core::num::{pooled_mean, round_to};
use serde::Serialize;

///
/// RollupReport
///

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupReport {
    pub updated: u32,
    /// Regions left untouched because no member code resolved.
    pub skipped: Vec<String>,
}

/// Recompute every region's cached rollups from current country data.
///
/// Dangling member codes are skipped; a region with zero resolvable members
/// keeps its previous rollup values and is reported instead.
pub fn refresh_region_rollups(db: &mut StatsDb) -> RollupReport {
    let mut report = RollupReport::default();

    let names: Vec<String> = db.regions().keys().cloned().collect();
    for name in names {
        let Some(region) = db.region(&name) else {
            continue;
        };

        let members: Vec<Country> = region
            .countries
            .iter()
            .filter_map(|code| db.country(code))
            .cloned()
            .collect();

        if members.is_empty() {
            report.skipped.push(name);
            continue;
        }

        let total_pop_2025: u64 = members.iter().filter_map(|c| c.pop2025).sum();
        let total_pop_2050: u64 = members.iter().filter_map(|c| c.pop2050).sum();
        let total_area: f64 = members
            .iter()
            .filter_map(|c| c.land_area_km.or(c.area))
            .sum();

        // zero-valued metrics are treated as absent, as the ingestion job does
        let average_density = pooled_mean(
            members
                .iter()
                .map(|c| c.density.filter(|d| *d > 0.0)),
        )
        .map(|v| round_to(v, 2));
        let average_growth_rate = pooled_mean(
            members
                .iter()
                .map(|c| c.growth_rate.filter(|g| *g != 0.0)),
        )
        .map(|v| round_to(v, 4));

        if let Some(region) = db.regions_mut().get_mut(&name) {
            region.total_population_2025 = Some(total_pop_2025);
            region.total_population_2050 = Some(total_pop_2050);
            region.average_density = average_density;
            region.average_growth_rate = average_growth_rate;
            region.total_area = Some(total_area);
            report.updated += 1;
        }
    }

    report
}

///
/// TESTS
///
