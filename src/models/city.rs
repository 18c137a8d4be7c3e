use serde::{Deserialize, Serialize};
use validator::Validate;

/// One populated place in the converted output.
///
/// Field order is the key order of the JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CityRecord {
    #[validate(length(min = 1))]
    pub name: String,

    pub lat: f64,

    pub lng: f64,

    pub population: u64,

    pub country: String,
}

impl CityRecord {
    pub fn new(name: String, lat: f64, lng: f64, population: u64, country: String) -> Self {
        Self {
            name,
            lat,
            lng,
            population,
            country,
        }
    }

    pub fn has_known_country(&self) -> bool {
        self.country != crate::utils::constants::UNKNOWN_COUNTRY
    }
}
