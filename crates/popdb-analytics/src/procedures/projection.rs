//! Projected population movers: which countries gain or lose the most people
//! between 2025 and 2050, plus a global summary.

use crate::{AnalyticsError, AnalyticsSession};
use popdb_core::num::{pooled_mean, round_to};
use popdb_schema::Country;
use serde::Serialize;

/// Each ranked sub-list never exceeds this many countries.
const MAX_MOVERS: usize = 8;

///
/// ProjectionDoc
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionDoc {
    pub summary: ProjectionSummary,
    pub top_gainers: Vec<ProjectionRow>,
    pub top_decliners: Vec<ProjectionRow>,
}

///
/// ProjectionSummary
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub avg_growth_rate: Option<f64>,
    pub avg_percent_change: Option<f64>,
    pub total_pop_2025: u64,
    pub total_pop_2050: u64,
    pub projected_change: i64,
}

///
/// ProjectionRow
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    pub name: String,
    pub cca3: String,
    pub pop2025: Option<u64>,
    pub pop2050: Option<u64>,
    pub growth_rate: Option<f64>,
    pub density: Option<f64>,
    pub world_percentage: Option<f64>,
    pub change: Option<i64>,
    pub percent_change: Option<f64>,
}

impl ProjectionRow {
    fn derive(country: &Country) -> Self {
        let change = match (country.pop2025, country.pop2050) {
            (Some(now), Some(later)) => Some(later as i64 - now as i64),
            _ => None,
        };
        // guarded before the division ever executes
        let percent_change = match (country.pop2025, change) {
            (Some(now), Some(diff)) if now > 0 => Some(diff as f64 / now as f64 * 100.0),
            _ => None,
        };

        Self {
            name: country.name.clone(),
            cca3: country.cca3.clone(),
            pop2025: country.pop2025,
            pop2050: country.pop2050,
            growth_rate: country.growth_rate,
            density: country.density,
            world_percentage: country.world_percentage,
            change,
            percent_change,
        }
    }
}

impl AnalyticsSession<'_> {
    /// Global projection summary plus the eight biggest absolute gainers and
    /// decliners. Countries without both population figures cannot rank, but
    /// still appear in the summary totals (contributing nothing).
    ///
    /// Zero countries yields an empty-shaped document, not an error.
    pub fn projection_movers(&self) -> Result<ProjectionDoc, AnalyticsError> {
        let countries = self.db().countries().query().entities()?;
        let rows: Vec<ProjectionRow> = countries.iter().map(ProjectionRow::derive).collect();

        let total_pop_2025: u64 = countries.iter().filter_map(|c| c.pop2025).sum();
        let total_pop_2050: u64 = countries.iter().filter_map(|c| c.pop2050).sum();
        let summary = ProjectionSummary {
            avg_growth_rate: pooled_mean(countries.iter().map(|c| c.growth_rate))
                .map(|v| round_to(v, 4)),
            avg_percent_change: pooled_mean(rows.iter().map(|r| r.percent_change))
                .map(|v| round_to(v, 2)),
            total_pop_2025,
            total_pop_2050,
            projected_change: total_pop_2050 as i64 - total_pop_2025 as i64,
        };

        // rows without a computable change cannot rank in either direction
        let ranked: Vec<&ProjectionRow> = rows.iter().filter(|r| r.change.is_some()).collect();

        let mut gainers = ranked.clone();
        gainers.sort_by(|a, b| b.change.cmp(&a.change));
        let top_gainers: Vec<ProjectionRow> =
            gainers.into_iter().take(MAX_MOVERS).cloned().collect();

        let mut decliners = ranked;
        decliners.sort_by(|a, b| a.change.cmp(&b.change));
        let top_decliners: Vec<ProjectionRow> =
            decliners.into_iter().take(MAX_MOVERS).cloned().collect();

        Ok(ProjectionDoc {
            summary,
            top_gainers,
            top_decliners,
        })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{country, world};
    use popdb_schema::StatsDb;

    #[test]
    fn summary_totals_and_rounded_means() {
        let db = world();
        let doc = AnalyticsSession::new(&db).projection_movers().unwrap();

        assert_eq!(doc.summary.total_pop_2025, 1_050);
        assert_eq!(doc.summary.total_pop_2050, 1_240);
        assert_eq!(doc.summary.projected_change, 190);
        // (50 - 10 + 10 + 20 + 100) / 5, EEE contributes nothing
        assert_eq!(doc.summary.avg_percent_change, Some(34.0));
        assert_eq!(doc.summary.avg_growth_rate, Some(0.034));
    }

    #[test]
    fn gainers_descend_and_decliners_ascend() {
        let db = world();
        let doc = AnalyticsSession::new(&db).projection_movers().unwrap();

        let gainers: Vec<&str> = doc.top_gainers.iter().map(|r| r.cca3.as_str()).collect();
        // AAA and FFF tie at +50; store order breaks the tie
        assert_eq!(gainers, vec!["DDD", "AAA", "FFF", "CCC", "BBB"]);

        let decliners: Vec<&str> = doc.top_decliners.iter().map(|r| r.cca3.as_str()).collect();
        assert_eq!(decliners, vec!["BBB", "CCC", "AAA", "FFF", "DDD"]);
    }

    #[test]
    fn null_population_rows_never_rank() {
        let db = world();
        let doc = AnalyticsSession::new(&db).projection_movers().unwrap();

        assert!(doc.top_gainers.iter().all(|r| r.cca3 != "EEE"));
        assert!(doc.top_decliners.iter().all(|r| r.cca3 != "EEE"));
    }

    #[test]
    fn zero_base_population_guards_percent_change() {
        let mut db = StatsDb::new();
        db.insert_country(country("WWW", "Wland", Some(0), Some(50), None, None));

        let doc = AnalyticsSession::new(&db).projection_movers().unwrap();
        let row = &doc.top_gainers[0];
        assert_eq!(row.change, Some(50));
        assert_eq!(row.percent_change, None);
        assert_eq!(doc.summary.avg_percent_change, None);
    }

    #[test]
    fn empty_store_yields_empty_shaped_document() {
        let db = StatsDb::new();
        let doc = AnalyticsSession::new(&db).projection_movers().unwrap();

        assert_eq!(doc.summary.total_pop_2025, 0);
        assert_eq!(doc.summary.projected_change, 0);
        assert_eq!(doc.summary.avg_growth_rate, None);
        assert!(doc.top_gainers.is_empty());
        assert!(doc.top_decliners.is_empty());
    }
}
