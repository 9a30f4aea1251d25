//! Shared fixture world for procedure tests.
//!
//! Six countries, five regions, and indicator coverage chosen to exercise
//! every join/null edge: a country with no data at all (EEE), a dense country
//! with no snapshot (DDD), a country whose newest observation predates the
//! reference year (FFF), and a region whose only member code dangles (Ghost).

use popdb_schema::{Country, EconomicIndicator, Region, RegionType, StatsDb};

pub(crate) fn country(
    cca3: &str,
    name: &str,
    pop2025: Option<u64>,
    pop2050: Option<u64>,
    density: Option<f64>,
    growth_rate: Option<f64>,
) -> Country {
    Country {
        pop2025,
        pop2050,
        density,
        growth_rate,
        land_area_km: density.map(|d| pop2025.unwrap_or(0) as f64 / d),
        ..Country::new(cca3, &cca3[..2], name)
    }
}

pub(crate) fn indicator(
    cca3: &str,
    year: u16,
    gdp_per_capita: Option<f64>,
    gdp_total: Option<f64>,
    life_expectancy: Option<f64>,
    urbanization_rate: Option<f64>,
) -> EconomicIndicator {
    EconomicIndicator {
        gdp_per_capita,
        gdp_total,
        life_expectancy,
        urbanization_rate,
        ..EconomicIndicator::new(cca3, year)
    }
}

pub(crate) fn world() -> StatsDb {
    let mut db = StatsDb::new();

    db.insert_country(country("AAA", "Alphaland", Some(100), Some(150), Some(10.0), Some(0.05)));
    db.insert_country(country("BBB", "Betaland", Some(200), Some(180), Some(400.0), Some(-0.01)));
    db.insert_country(country("CCC", "Gammaland", Some(300), Some(330), Some(500.0), Some(0.02)));
    db.insert_country(country("DDD", "Deltaland", Some(400), Some(480), Some(600.0), Some(0.03)));
    db.insert_country(country("EEE", "Epsilonland", None, None, None, None));
    db.insert_country(country("FFF", "Zetaland", Some(50), Some(100), Some(20.0), Some(0.08)));

    db.insert_indicator(indicator("AAA", 2023, Some(9_000.0), Some(0.9), Some(70.0), Some(50.0)));
    db.insert_indicator(indicator("AAA", 2024, Some(10_000.0), Some(1.0), Some(71.0), Some(55.0)));
    db.insert_indicator(indicator("BBB", 2024, Some(2_000.0), Some(0.4), Some(65.0), Some(40.0)));
    db.insert_indicator(indicator("CCC", 2024, Some(40_000.0), Some(12.0), Some(82.0), Some(90.0)));
    // FFF's newest observation predates the 2024 reference year
    db.insert_indicator(indicator("FFF", 2023, Some(3_000.0), Some(0.15), Some(60.0), Some(30.0)));

    db.insert_region(Region::new("North", RegionType::Continent, ["AAA", "BBB", "EEE"]));
    db.insert_region(Region::new("South", RegionType::Continent, ["CCC", "DDD", "FFF"]));
    db.insert_region(Region::new("Southland", RegionType::Subregion, ["CCC", "FFF", "XXX"]));
    db.insert_region(Region::new("Betazone", RegionType::EconomicZone, ["BBB", "CCC"]));
    db.insert_region(Region::new("Ghost", RegionType::Subregion, ["ZZZ"]));

    db
}
