use popdb_core::prelude::*;
use serde::{Deserialize, Serialize};

///
/// EconomicIndicator
///
/// Zero or more rows per country, one per observation year, keyed by the
/// composite (countryCode, year). New observations are new rows; a row is
/// never updated in place. Every metric is independently nullable, so a
/// country may have partial coverage for any year.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicIndicator {
    pub country_code: String,
    pub year: u16,
    pub gdp_per_capita: Option<f64>,
    pub gdp_total: Option<f64>,
    pub human_development_index: Option<f64>,
    pub gini_coefficient: Option<f64>,
    pub unemployment_rate: Option<f64>,
    pub urbanization_rate: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub literacy_rate: Option<f64>,
}

impl EconomicIndicator {
    /// Bare observation row; metric fields start null.
    #[must_use]
    pub fn new(country_code: impl Into<String>, year: u16) -> Self {
        Self {
            country_code: country_code.into(),
            year,
            ..Self::default()
        }
    }
}

impl FieldValues for EconomicIndicator {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "country_code" => Some(Value::Text(self.country_code.clone())),
            "year" => Some(Value::from(self.year)),
            "gdp_per_capita" => Some(Value::from(self.gdp_per_capita)),
            "gdp_total" => Some(Value::from(self.gdp_total)),
            "human_development_index" => Some(Value::from(self.human_development_index)),
            "gini_coefficient" => Some(Value::from(self.gini_coefficient)),
            "unemployment_rate" => Some(Value::from(self.unemployment_rate)),
            "urbanization_rate" => Some(Value::from(self.urbanization_rate)),
            "life_expectancy" => Some(Value::from(self.life_expectancy)),
            "literacy_rate" => Some(Value::from(self.literacy_rate)),
            _ => None,
        }
    }
}

impl EntityKind for EconomicIndicator {
    type Key = (String, u16);

    const ENTITY_NAME: &'static str = "economic_indicator";
    const FIELDS: &'static [&'static str] = &[
        "country_code",
        "year",
        "gdp_per_capita",
        "gdp_total",
        "human_development_index",
        "gini_coefficient",
        "unemployment_rate",
        "urbanization_rate",
        "life_expectancy",
        "literacy_rate",
    ];

    fn key(&self) -> Self::Key {
        (self.country_code.clone(), self.year)
    }
}

///
/// TESTS
///
