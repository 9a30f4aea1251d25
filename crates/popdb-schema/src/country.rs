use popdb_core::prelude::*;
use serde::{Deserialize, Serialize};

///
/// Country
///
/// One row per sovereign territory, keyed by the 3-letter `cca3` code.
///
/// `density` is precomputed at ingestion time (pop2025 / landAreaKm), never
/// derived at query time. Numeric attributes are independently nullable; a
/// null value is excluded from averages rather than coerced to zero.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub cca3: String,
    pub cca2: String,
    pub name: String,
    pub pop2025: Option<u64>,
    pub pop2050: Option<u64>,
    pub area: Option<f64>,
    pub land_area_km: Option<f64>,
    pub density: Option<f64>,
    pub growth_rate: Option<f64>,
    pub world_percentage: Option<f64>,
    pub rank: Option<u32>,
}

impl Country {
    /// Bare identity row; attribute fields start null.
    #[must_use]
    pub fn new(cca3: impl Into<String>, cca2: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cca3: cca3.into(),
            cca2: cca2.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

impl FieldValues for Country {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "cca3" => Some(Value::Text(self.cca3.clone())),
            "cca2" => Some(Value::Text(self.cca2.clone())),
            "name" => Some(Value::Text(self.name.clone())),
            "pop2025" => Some(Value::from(self.pop2025)),
            "pop2050" => Some(Value::from(self.pop2050)),
            "area" => Some(Value::from(self.area)),
            "land_area_km" => Some(Value::from(self.land_area_km)),
            "density" => Some(Value::from(self.density)),
            "growth_rate" => Some(Value::from(self.growth_rate)),
            "world_percentage" => Some(Value::from(self.world_percentage)),
            "rank" => Some(Value::from(self.rank)),
            _ => None,
        }
    }
}

impl EntityKind for Country {
    type Key = String;

    const ENTITY_NAME: &'static str = "country";
    const FIELDS: &'static [&'static str] = &[
        "cca3",
        "cca2",
        "name",
        "pop2025",
        "pop2050",
        "area",
        "land_area_km",
        "density",
        "growth_rate",
        "world_percentage",
        "rank",
    ];

    fn key(&self) -> Self::Key {
        self.cca3.clone()
    }
}

///
/// TESTS
///
