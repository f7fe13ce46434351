//! Data models for the weather summary service
//!
//! - Record: one row of the weather table
//! - Summary: temperature statistics derived from matching rows
//! - Location: a ZIP code resolved to country and town

pub mod location;
pub mod record;
pub mod summary;

pub use location::ResolvedLocation;
pub use record::WeatherRecord;
pub use summary::TemperatureSummary;
