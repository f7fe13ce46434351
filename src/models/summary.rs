//! Temperature summary model

use serde::Serialize;

/// Min/mean/max over the numeric temperatures of a row set, each rounded to
/// two decimals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSummary {
    pub max: f64,
    pub average: f64,
    pub min: f64,
    /// Number of values that took part, not rows scanned
    pub data_points: usize,
}

/// Wire form of a summary with temperatures rendered as `"<value> °C"`
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FormattedSummary {
    pub max: String,
    pub average: String,
    pub min: String,
    pub data_points: usize,
}

impl TemperatureSummary {
    #[must_use]
    pub fn formatted(&self) -> FormattedSummary {
        FormattedSummary {
            max: format_celsius(self.max),
            average: format_celsius(self.average),
            min: format_celsius(self.min),
            data_points: self.data_points,
        }
    }
}

/// Render a temperature, keeping one decimal on integral values (`30.0 °C`)
#[must_use]
pub fn format_celsius(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1} °C")
    } else {
        format!("{value} °C")
    }
}
