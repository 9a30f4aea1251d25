//! Economic snapshot resolution.
//!
//! A snapshot is the single `EconomicIndicator` row selected for a country
//! under a stated policy. `FixedYear` is an exact match; it never falls back
//! to a neighboring year. Same-key duplicates cannot exist (the store is
//! keyed by country/year), so "most recent" needs no further tie-break.

use popdb_schema::{EconomicIndicator, StatsDb};
use std::collections::BTreeMap;

///
/// SnapshotPolicy
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SnapshotPolicy {
    /// Newest observation year available for the country.
    MostRecent,
    /// Exactly this observation year, or nothing.
    FixedYear(u16),
}

/// Resolve at most one snapshot for one country.
#[must_use]
pub fn snapshot_for<'a>(
    db: &'a StatsDb,
    cca3: &str,
    policy: SnapshotPolicy,
) -> Option<&'a EconomicIndicator> {
    match policy {
        SnapshotPolicy::MostRecent => db
            .indicators()
            .range((cca3.to_string(), u16::MIN)..=(cca3.to_string(), u16::MAX))
            .next_back()
            .map(|(_, row)| row),
        SnapshotPolicy::FixedYear(year) => db.indicators().get(&(cca3.to_string(), year)),
    }
}

/// Resolve snapshots for every country in one pass over the indicator store.
///
/// The store iterates in (country, year) order, so under `MostRecent` the
/// last row seen per country is the newest one.
#[must_use]
pub fn snapshot_map(db: &StatsDb, policy: SnapshotPolicy) -> BTreeMap<&str, &EconomicIndicator> {
    let mut map: BTreeMap<&str, &EconomicIndicator> = BTreeMap::new();

    for row in db.indicators().values() {
        match policy {
            SnapshotPolicy::MostRecent => {
                map.insert(row.country_code.as_str(), row);
            }
            SnapshotPolicy::FixedYear(year) => {
                if row.year == year {
                    map.insert(row.country_code.as_str(), row);
                }
            }
        }
    }

    map
}

///
/// TESTS
///
