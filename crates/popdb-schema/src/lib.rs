//! Domain schema for PopDB: the three record collections (countries, regions,
//! economic indicators) and the `StatsDb` facade that owns their stores.

mod country;
mod indicator;
mod region;
mod rollup;

pub use country::Country;
pub use indicator::EconomicIndicator;
pub use region::{Region, RegionType};
pub use rollup::{RollupReport, refresh_region_rollups};

use popdb_core::{
    db::{EntityStore, Predicate},
    error::InternalError,
};

///
/// StatsDb
///
/// One store per entity type. The analytics engine reads it through `&`;
/// only ingestion-style operations (insert, rollup refresh) take `&mut`.
///

#[derive(Clone, Debug, Default)]
pub struct StatsDb {
    countries: EntityStore<Country>,
    regions: EntityStore<Region>,
    indicators: EntityStore<EconomicIndicator>,
}

impl StatsDb {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Stores
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn countries(&self) -> &EntityStore<Country> {
        &self.countries
    }

    #[must_use]
    pub const fn regions(&self) -> &EntityStore<Region> {
        &self.regions
    }

    #[must_use]
    pub const fn indicators(&self) -> &EntityStore<EconomicIndicator> {
        &self.indicators
    }

    pub const fn countries_mut(&mut self) -> &mut EntityStore<Country> {
        &mut self.countries
    }

    pub const fn regions_mut(&mut self) -> &mut EntityStore<Region> {
        &mut self.regions
    }

    pub const fn indicators_mut(&mut self) -> &mut EntityStore<EconomicIndicator> {
        &mut self.indicators
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    pub fn insert_country(&mut self, country: Country) -> Option<Country> {
        self.countries.insert(country)
    }

    pub fn insert_region(&mut self, region: Region) -> Option<Region> {
        self.regions.insert(region)
    }

    pub fn insert_indicator(&mut self, indicator: EconomicIndicator) -> Option<EconomicIndicator> {
        self.indicators.insert(indicator)
    }

    // ------------------------------------------------------------------
    // Thin accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn country(&self, cca3: &str) -> Option<&Country> {
        self.countries.get(cca3)
    }

    #[must_use]
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// List indicators, optionally narrowed by country code and/or year.
    pub fn indicators_filtered(
        &self,
        country_code: Option<&str>,
        year: Option<u16>,
    ) -> Result<Vec<EconomicIndicator>, InternalError> {
        let mut query = self.indicators.query();
        if let Some(code) = country_code {
            query = query.filter(Predicate::eq("country_code", code));
        }
        if let Some(year) = year {
            query = query.filter(Predicate::eq("year", year));
        }
        query.entities()
    }

    /// All observation years for one country, newest first.
    pub fn indicators_for_country(
        &self,
        cca3: &str,
    ) -> Result<Vec<EconomicIndicator>, InternalError> {
        self.indicators
            .query()
            .filter(Predicate::eq("country_code", cca3))
            .order_by_desc("year")
            .entities()
    }
}

///
/// TESTS
///
