use popdb_core::prelude::*;
use serde::{Deserialize, Serialize};

///
/// RegionType
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    Continent,
    EconomicZone,
    Subregion,
}

impl RegionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continent => "continent",
            Self::EconomicZone => "economic_zone",
            Self::Subregion => "subregion",
        }
    }
}

///
/// Region
///
/// One row per named geographic or economic grouping, keyed by name.
///
/// `countries` is membership only (unordered cca3 codes, no weighting).
/// Codes SHOULD resolve to an existing country, but consumers must tolerate
/// dangling codes and regions with zero resolvable members.
///
/// The rollup fields mirror what the analytics engine computes live; they are
/// refreshed by `refresh_region_rollups` and are never read back by the live
/// aggregation path.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub name: String,
    #[serde(rename = "type")]
    pub region_type: RegionType,
    pub countries: Vec<String>,
    pub total_population_2025: Option<u64>,
    pub total_population_2050: Option<u64>,
    pub average_density: Option<f64>,
    pub average_growth_rate: Option<f64>,
    pub total_area: Option<f64>,
}

impl Region {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        region_type: RegionType,
        countries: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            region_type,
            countries: countries.into_iter().map(Into::into).collect(),
            total_population_2025: None,
            total_population_2050: None,
            average_density: None,
            average_growth_rate: None,
            total_area: None,
        }
    }
}

impl FieldValues for Region {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(Value::Text(self.name.clone())),
            "region_type" => Some(Value::Text(self.region_type.as_str().to_string())),
            "countries" => Some(Value::List(
                self.countries.iter().cloned().map(Value::Text).collect(),
            )),
            "total_population_2025" => Some(Value::from(self.total_population_2025)),
            "total_population_2050" => Some(Value::from(self.total_population_2050)),
            "average_density" => Some(Value::from(self.average_density)),
            "average_growth_rate" => Some(Value::from(self.average_growth_rate)),
            "total_area" => Some(Value::from(self.total_area)),
            _ => None,
        }
    }
}

impl EntityKind for Region {
    type Key = String;

    const ENTITY_NAME: &'static str = "region";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "region_type",
        "countries",
        "total_population_2025",
        "total_population_2050",
        "average_density",
        "average_growth_rate",
        "total_area",
    ];

    fn key(&self) -> Self::Key {
        self.name.clone()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_declared_field_projects() {
        let region = Region::new("South Asia", RegionType::Subregion, ["IND", "BGD"]);
        for field in Region::FIELDS {
            assert!(
                region.get_value(field).is_some(),
                "field `{field}` declared but not projected"
            );
        }
    }

    #[test]
    fn membership_projects_as_a_text_list() {
        let region = Region::new("South Asia", RegionType::Subregion, ["IND", "BGD"]);
        assert_eq!(
            region.get_value("countries"),
            Some(Value::List(vec![
                Value::Text("IND".to_string()),
                Value::Text("BGD".to_string()),
            ]))
        );
    }

    #[test]
    fn wire_shape_uses_type_key_and_snake_case_variants() {
        let region = Region::new("EU", RegionType::EconomicZone, ["FRA"]);
        let json = serde_json::to_value(&region).unwrap();
        assert_eq!(json["type"], "economic_zone");
        assert_eq!(json["countries"][0], "FRA");
    }
}
