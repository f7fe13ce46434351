//! Location index and query engine
//!
//! Rows are indexed by their normalized country and town once, at load
//! time. Queries resolve through the index and return rows in table order.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::aggregate::summarize;
use crate::dataset::WeatherTable;
use crate::error::WeatherError;
use crate::models::{TemperatureSummary, WeatherRecord};
use crate::normalize::NormalizedToken;

/// Row positions keyed by normalized country and town. Empty tokens are
/// not indexed.
#[derive(Debug, Default, Clone)]
pub struct LocationIndex {
    by_country: BTreeMap<NormalizedToken, Vec<usize>>,
    by_town: BTreeMap<NormalizedToken, Vec<usize>>,
}

impl LocationIndex {
    #[must_use]
    pub fn build(records: &[WeatherRecord]) -> Self {
        let mut index = Self::default();
        for (row, record) in records.iter().enumerate() {
            if let Some(country) = record.normalized_country().clone().non_empty() {
                index.by_country.entry(country).or_default().push(row);
            }
            if let Some(town) = record.normalized_town().clone().non_empty() {
                index.by_town.entry(town).or_default().push(row);
            }
        }
        index
    }

    /// Distinct countries in ascending byte order
    pub fn countries(&self) -> impl Iterator<Item = &NormalizedToken> {
        self.by_country.keys()
    }

    /// Distinct towns in ascending byte order
    pub fn towns(&self) -> impl Iterator<Item = &NormalizedToken> {
        self.by_town.keys()
    }

    fn country_rows(&self, country: &NormalizedToken) -> &[usize] {
        self.by_country.get(country).map_or(&[][..], Vec::as_slice)
    }

    fn town_rows(&self, town: &NormalizedToken) -> &[usize] {
        self.by_town.get(town).map_or(&[][..], Vec::as_slice)
    }
}

/// Country and/or town a query is restricted to. At least one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFilter {
    country: Option<NormalizedToken>,
    town: Option<NormalizedToken>,
}

impl LocationFilter {
    /// Build a filter, treating empty tokens as absent
    pub fn new(country: NormalizedToken, town: NormalizedToken) -> crate::Result<Self> {
        let country = country.non_empty();
        let town = town.non_empty();
        if country.is_none() && town.is_none() {
            return Err(WeatherError::validation(
                "Please provide either a country or town",
            ));
        }
        Ok(Self { country, town })
    }

    #[must_use]
    pub fn country(&self) -> Option<&NormalizedToken> {
        self.country.as_ref()
    }

    #[must_use]
    pub fn town(&self) -> Option<&NormalizedToken> {
        self.town.as_ref()
    }
}

/// Every distinct non-empty normalized country, sorted
#[must_use]
pub fn list_countries(table: &WeatherTable) -> Vec<NormalizedToken> {
    table.index().countries().cloned().collect()
}

/// Every distinct non-empty normalized town, sorted
#[must_use]
pub fn list_towns(table: &WeatherTable) -> Vec<NormalizedToken> {
    table.index().towns().cloned().collect()
}

/// Rows whose country equals the filter's country OR whose town equals the
/// filter's town, in table order, each at most once
#[must_use]
pub fn filter<'a>(table: &'a WeatherTable, f: &LocationFilter) -> Vec<&'a WeatherRecord> {
    let index = table.index();
    let by_country = f.country().map_or(&[][..], |c| index.country_rows(c));
    let by_town = f.town().map_or(&[][..], |t| index.town_rows(t));

    merge_rows(by_country, by_town)
        .into_iter()
        .map(|row| &table.records()[row])
        .collect()
}

/// Union of two ascending row lists, ascending and without duplicates
fn merge_rows(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                merged.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                merged.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                merged.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}

/// Temperature summary for the rows matching `f`
///
/// No matching rows and matching rows without usable temperatures are
/// reported as different errors.
#[instrument(skip_all, fields(country = ?f.country(), town = ?f.town()))]
pub fn predict(table: &WeatherTable, f: &LocationFilter) -> crate::Result<TemperatureSummary> {
    let rows = filter(table, f);
    if rows.is_empty() {
        debug!("No rows matched");
        return Err(WeatherError::NoMatchingLocation);
    }

    let summary = summarize(rows.iter().copied(), |r| r.temperature_celsius)
        .ok_or(WeatherError::NoTemperatureData)?;
    debug!(
        rows = rows.len(),
        data_points = summary.data_points,
        "Computed temperature summary"
    );
    Ok(summary)
}
