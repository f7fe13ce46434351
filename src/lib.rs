//! Weather summary service
//!
//! Loads a weather table once, then answers location listings, temperature
//! summaries for a country or town, and ZIP code lookups through an external
//! geocoding provider.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geocode;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod query;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::AppConfig;
pub use dataset::WeatherTable;
pub use error::{ErrorKind, WeatherError};
pub use geocode::GeocodeClient;
pub use models::{ResolvedLocation, TemperatureSummary, WeatherRecord};
pub use normalize::{NormalizedToken, ZipToken, sanitize, validate_zip};
pub use query::{LocationFilter, filter, list_countries, list_towns, predict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;
