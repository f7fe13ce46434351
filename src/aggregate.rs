//! Temperature aggregation over filtered rows
//!
//! Values that cannot be read as finite numbers are dropped before any
//! statistic is computed. They never count as zero.

use crate::models::{TemperatureSummary, WeatherRecord};

/// Parse a raw cell as a number. Empty, non-numeric, NaN and infinite
/// cells are absent.
#[must_use]
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Round to two decimals, halves away from zero
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Summarize already-coerced values. `None` when no value is present.
pub fn summarize_values<I>(values: I) -> Option<TemperatureSummary>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values.into_iter().flatten().filter(|v| v.is_finite()) {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    if count == 0 {
        return None;
    }

    Some(TemperatureSummary {
        max: round2(max),
        average: round2(sum / count as f64),
        min: round2(min),
        data_points: count,
    })
}

/// Summarize the column picked by `field` across `records`
pub fn summarize<'a, I, F>(records: I, field: F) -> Option<TemperatureSummary>
where
    I: IntoIterator<Item = &'a WeatherRecord>,
    F: Fn(&WeatherRecord) -> Option<f64>,
{
    summarize_values(records.into_iter().map(field))
}
