//! Weather table row model

use crate::normalize::{NormalizedToken, sanitize};

/// One row of the weather table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    /// Country as written in the source
    pub country: Option<String>,
    /// Location name as written in the source
    pub location_name: Option<String>,
    /// Temperature in Celsius, `None` when missing or not numeric
    pub temperature_celsius: Option<f64>,
    normalized_country: NormalizedToken,
    normalized_town: NormalizedToken,
}

impl WeatherRecord {
    /// Create a record, normalizing its location fields once
    #[must_use]
    pub fn new(
        country: Option<String>,
        location_name: Option<String>,
        temperature_celsius: Option<f64>,
    ) -> Self {
        let normalized_country = country.as_deref().map(sanitize).unwrap_or_default();
        let normalized_town = location_name.as_deref().map(sanitize).unwrap_or_default();
        Self {
            country,
            location_name,
            temperature_celsius,
            normalized_country,
            normalized_town,
        }
    }

    #[must_use]
    pub fn normalized_country(&self) -> &NormalizedToken {
        &self.normalized_country
    }

    #[must_use]
    pub fn normalized_town(&self) -> &NormalizedToken {
        &self.normalized_town
    }
}
