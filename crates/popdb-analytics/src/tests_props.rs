//! Property coverage: ranking truncation bounds and idempotence must hold
//! for arbitrary store contents, not just the curated fixture.

use crate::{AnalyticsSession, OvercrowdingParams};
use popdb_schema::{Country, EconomicIndicator, Region, RegionType, StatsDb};
use proptest::prelude::*;

type ArbCountry = (
    Option<u64>,
    Option<u64>,
    Option<f64>,
    Option<f64>,
);
type ArbIndicator = (usize, u16, Option<f64>);
type ArbRegion = (u8, Vec<usize>);

fn arb_world() -> impl Strategy<Value = StatsDb> {
    let countries = prop::collection::vec(
        (
            prop::option::of(0u64..100_000),
            prop::option::of(0u64..100_000),
            prop::option::of(0.0f64..25_000.0),
            prop::option::of(-0.05f64..0.25),
        ),
        0..60,
    );
    let indicators = prop::collection::vec(
        (0usize..60, 2020u16..2026, prop::option::of(100.0f64..100_000.0)),
        0..120,
    );
    let regions = prop::collection::vec(
        (0u8..3, prop::collection::vec(0usize..70, 0..10)),
        0..20,
    );

    (countries, indicators, regions).prop_map(build_world)
}

fn build_world(
    (countries, indicators, regions): (Vec<ArbCountry>, Vec<ArbIndicator>, Vec<ArbRegion>),
) -> StatsDb {
    let mut db = StatsDb::new();

    for (index, (pop2025, pop2050, density, growth_rate)) in countries.into_iter().enumerate() {
        db.insert_country(Country {
            pop2025,
            pop2050,
            density,
            growth_rate,
            ..Country::new(code(index), "XX", format!("Country {index}"))
        });
    }

    for (index, year, gdp_per_capita) in indicators {
        db.insert_indicator(EconomicIndicator {
            gdp_per_capita,
            ..EconomicIndicator::new(code(index), year)
        });
    }

    for (index, (type_index, members)) in regions.into_iter().enumerate() {
        let region_type = match type_index {
            0 => RegionType::Continent,
            1 => RegionType::Subregion,
            _ => RegionType::EconomicZone,
        };
        // member indexes past the country count become dangling codes
        db.insert_region(Region::new(
            format!("Region {index}"),
            region_type,
            members.into_iter().map(code),
        ));
    }

    db
}

fn code(index: usize) -> String {
    format!("C{index:02}")
}

proptest! {
    #[test]
    fn truncation_bounds_hold_for_any_store(db in arb_world()) {
        let session = AnalyticsSession::new(&db);

        let high_growth = session.high_growth_with_economics().unwrap();
        prop_assert!(high_growth.high_growth_countries.len() <= 20);
        for entry in &high_growth.high_growth_countries {
            prop_assert!(entry.growth_rate.unwrap() > high_growth.avg_growth_rate);
        }

        let projection = session.projection_movers().unwrap();
        prop_assert!(projection.top_gainers.len() <= 8);
        prop_assert!(projection.top_decliners.len() <= 8);

        let overcrowding = session
            .overcrowding_analysis(&OvercrowdingParams::default())
            .unwrap();
        prop_assert!(overcrowding.len() <= 15);
        for row in &overcrowding {
            prop_assert!(row.density.unwrap() > 300.0);
        }

        let correlation = session.economic_population_correlation().unwrap();
        prop_assert!(correlation.top_performers.high_gdp.len() <= 5);
        prop_assert!(correlation.top_performers.high_density.len() <= 5);
        prop_assert!(correlation.top_performers.best_balance.len() <= 5);

        let comparison = session.regional_comparison().unwrap();
        prop_assert!(comparison.top_regions.len() <= 10);
        prop_assert!(comparison.economic_leaders.len() <= 10);
        for row in &comparison.top_regions {
            prop_assert_eq!(row.region_type, RegionType::Subregion);
        }
    }

    #[test]
    fn quadrant_counts_never_exceed_complete_rows(db in arb_world()) {
        let session = AnalyticsSession::new(&db);
        let correlation = session.economic_population_correlation().unwrap();

        let complete = db
            .countries()
            .values()
            .filter(|c| {
                c.density.is_some()
                    && crate::snapshot_for(&db, &c.cca3, crate::SnapshotPolicy::MostRecent)
                        .is_some_and(|s| s.gdp_per_capita.is_some())
            })
            .count() as u32;

        prop_assert!(
            correlation.insights.high_gdp_high_density
                + correlation.insights.low_gdp_high_density
                <= complete
        );
    }

    #[test]
    fn procedures_are_idempotent_over_an_unchanged_store(db in arb_world()) {
        let session = AnalyticsSession::new(&db);

        let first = serde_json::to_string(&session.regional_analysis().unwrap()).unwrap();
        let second = serde_json::to_string(&session.regional_analysis().unwrap()).unwrap();
        prop_assert_eq!(first, second);

        let first = serde_json::to_string(&session.regional_comparison().unwrap()).unwrap();
        let second = serde_json::to_string(&session.regional_comparison().unwrap()).unwrap();
        prop_assert_eq!(first, second);

        let first = serde_json::to_string(&session.projection_movers().unwrap()).unwrap();
        let second = serde_json::to_string(&session.projection_movers().unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
