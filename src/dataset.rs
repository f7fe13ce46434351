//! Dataset loading
//!
//! The weather table is read once at startup from CSV into an immutable
//! [`WeatherTable`]. Any read or parse failure is fatal.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, instrument};

use crate::aggregate::coerce_numeric;
use crate::error::WeatherError;
use crate::models::WeatherRecord;
use crate::query::LocationIndex;

pub const COUNTRY_COLUMN: &str = "country";
pub const LOCATION_COLUMN: &str = "location_name";
pub const TEMPERATURE_COLUMN: &str = "temperature_celsius";

/// Positions of the columns the service reads
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    country: usize,
    location_name: usize,
    temperature_celsius: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> crate::Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| WeatherError::data_unavailable(format!("missing column '{name}'")))
        };

        Ok(Self {
            country: find(COUNTRY_COLUMN)?,
            location_name: find(LOCATION_COLUMN)?,
            temperature_celsius: find(TEMPERATURE_COLUMN)?,
        })
    }

    fn to_record(self, row: &StringRecord) -> WeatherRecord {
        let text = |idx: usize| {
            row.get(idx)
                .filter(|cell| !cell.trim().is_empty())
                .map(str::to_string)
        };

        WeatherRecord::new(
            text(self.country),
            text(self.location_name),
            row.get(self.temperature_celsius).and_then(coerce_numeric),
        )
    }
}

/// The in-memory weather table with its location index
#[derive(Debug, Default)]
pub struct WeatherTable {
    records: Vec<WeatherRecord>,
    index: LocationIndex,
}

impl WeatherTable {
    /// Load the table from a CSV file
    #[instrument(skip_all)]
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading weather dataset");

        let file = std::fs::File::open(path).map_err(|e| {
            WeatherError::data_unavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        let table = Self::from_reader(file)?;

        info!(
            rows = table.len(),
            countries = table.index().countries().count(),
            towns = table.index().towns().count(),
            "Weather dataset loaded"
        );
        Ok(table)
    }

    /// Parse CSV with a header row from any reader
    pub fn from_reader<R: Read>(reader: R) -> crate::Result<Self> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| WeatherError::data_unavailable(format!("unreadable header: {e}")))?
            .clone();
        let layout = ColumnLayout::from_headers(&headers)?;
        debug!(?layout, "Resolved dataset columns");

        let mut records = Vec::new();
        for (line, row) in rdr.records().enumerate() {
            let row = row.map_err(|e| {
                WeatherError::data_unavailable(format!("unreadable row {}: {e}", line + 1))
            })?;
            records.push(layout.to_record(&row));
        }

        Ok(Self::from_records(records))
    }

    /// Build a table from already-typed records
    #[must_use]
    pub fn from_records(records: Vec<WeatherRecord>) -> Self {
        let index = LocationIndex::build(&records);
        Self { records, index }
    }

    #[must_use]
    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    #[must_use]
    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
