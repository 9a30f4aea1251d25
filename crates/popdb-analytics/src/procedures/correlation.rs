//! Cross-sectional view of how economic standing relates to population
//! pressure: global means, quadrant counts, and three top-5 rankings.

use crate::{AnalyticsError, AnalyticsSession, SnapshotPolicy, snapshot_map};
use popdb_core::num::{pooled_mean, round_to};
use popdb_schema::{Country, EconomicIndicator};
use serde::Serialize;

/// Each ranking never exceeds this many countries.
const MAX_PERFORMERS: usize = 5;

///
/// CorrelationDoc
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationDoc {
    pub summary: CorrelationSummary,
    pub insights: CorrelationInsights,
    pub top_performers: TopPerformers,
}

///
/// CorrelationSummary
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationSummary {
    pub avg_density: Option<f64>,
    pub avg_gdp_per_capita: Option<f64>,
    pub avg_growth_rate: Option<f64>,
    pub avg_life_expectancy: Option<f64>,
    pub avg_urbanization: Option<f64>,
}

///
/// CorrelationInsights
///
/// Quadrant counts against the computed means. The two categories are not
/// exhaustive: a country missing either field is excluded from both.
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationInsights {
    pub high_gdp_high_density: u32,
    pub low_gdp_high_density: u32,
}

///
/// TopPerformers
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformers {
    pub high_gdp: Vec<CorrelationEntry>,
    pub high_density: Vec<CorrelationEntry>,
    pub best_balance: Vec<CorrelationEntry>,
}

///
/// CorrelationEntry
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationEntry {
    pub name: String,
    pub cca3: String,
    pub density: Option<f64>,
    pub growth_rate: Option<f64>,
    pub pop2025: Option<u64>,
    pub gdp_per_capita: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub urbanization_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_score: Option<f64>,
}

impl CorrelationEntry {
    fn join(country: &Country, snapshot: &EconomicIndicator) -> Self {
        Self {
            name: country.name.clone(),
            cca3: country.cca3.clone(),
            density: country.density,
            growth_rate: country.growth_rate,
            pop2025: country.pop2025,
            gdp_per_capita: snapshot.gdp_per_capita,
            life_expectancy: snapshot.life_expectancy,
            urbanization_rate: snapshot.urbanization_rate,
            balance_score: None,
        }
    }
}

impl AnalyticsSession<'_> {
    /// Join every country to its most recent snapshot (countries with no
    /// snapshot at all are discarded), then derive summary means, quadrant
    /// counts, and the three rankings. A country missing the inputs of one
    /// ranking is excluded from that ranking only.
    pub fn economic_population_correlation(&self) -> Result<CorrelationDoc, AnalyticsError> {
        let snapshots = snapshot_map(self.db(), SnapshotPolicy::MostRecent);
        let countries = self.db().countries().query().entities()?;

        let entries: Vec<CorrelationEntry> = countries
            .iter()
            .filter_map(|country| {
                snapshots
                    .get(country.cca3.as_str())
                    .map(|snap| CorrelationEntry::join(country, snap))
            })
            .collect();

        let avg_density = pooled_mean(entries.iter().map(|e| e.density));
        let avg_gdp = pooled_mean(entries.iter().map(|e| e.gdp_per_capita));

        let summary = CorrelationSummary {
            avg_density: avg_density.map(|v| round_to(v, 2)),
            avg_gdp_per_capita: avg_gdp.map(|v| round_to(v, 2)),
            avg_growth_rate: pooled_mean(entries.iter().map(|e| e.growth_rate))
                .map(|v| round_to(v, 4)),
            avg_life_expectancy: pooled_mean(entries.iter().map(|e| e.life_expectancy))
                .map(|v| round_to(v, 1)),
            avg_urbanization: pooled_mean(entries.iter().map(|e| e.urbanization_rate))
                .map(|v| round_to(v, 2)),
        };

        // a null mean degrades to 0 so the quadrant tests stay well-defined
        let gdp_mean = avg_gdp.unwrap_or(0.0);
        let density_mean = avg_density.unwrap_or(0.0);
        let mut high_gdp_high_density = 0u32;
        let mut low_gdp_high_density = 0u32;
        for entry in &entries {
            let (Some(gdp), Some(density)) = (entry.gdp_per_capita, entry.density) else {
                continue;
            };
            if gdp > gdp_mean && density > density_mean {
                high_gdp_high_density += 1;
            }
            if gdp < gdp_mean && density > density_mean {
                low_gdp_high_density += 1;
            }
        }

        let top_performers = TopPerformers {
            high_gdp: top_by(&entries, |e| e.gdp_per_capita),
            high_density: top_by(&entries, |e| e.density),
            best_balance: top_balance(&entries),
        };

        Ok(CorrelationDoc {
            summary,
            insights: CorrelationInsights {
                high_gdp_high_density,
                low_gdp_high_density,
            },
            top_performers,
        })
    }
}

/// Top entries by one optional metric, descending; rows without the metric
/// are excluded from this ranking only.
fn top_by(
    entries: &[CorrelationEntry],
    metric: impl Fn(&CorrelationEntry) -> Option<f64>,
) -> Vec<CorrelationEntry> {
    let mut ranked: Vec<(f64, &CorrelationEntry)> = entries
        .iter()
        .filter_map(|entry| metric(entry).map(|value| (value, entry)))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked
        .into_iter()
        .take(MAX_PERFORMERS)
        .map(|(_, entry)| entry.clone())
        .collect()
}

/// Top entries by balance score, descending. The score rewards GDP that is
/// not bought with extreme density.
fn top_balance(entries: &[CorrelationEntry]) -> Vec<CorrelationEntry> {
    let mut ranked: Vec<CorrelationEntry> = entries
        .iter()
        .filter_map(|entry| match (entry.gdp_per_capita, entry.density) {
            (Some(gdp), Some(density)) => Some(CorrelationEntry {
                balance_score: Some(gdp / (1.0 + density)),
                ..entry.clone()
            }),
            _ => None,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.balance_score
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.balance_score.unwrap_or(f64::NEG_INFINITY))
    });
    ranked.truncate(MAX_PERFORMERS);
    ranked
}

///
/// TESTS
///
