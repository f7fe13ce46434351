//! Error types and handling for the weather summary service

use thiserror::Error;

/// Coarse classification of a [`WeatherError`], one per HTTP outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input
    Validation,
    /// No data matched the request
    NotFound,
    /// The geocoding provider did not answer in time
    UpstreamTimeout,
    /// The geocoding provider failed or answered garbage
    UpstreamUnavailable,
    /// Anything unexpected
    Internal,
}

impl ErrorKind {
    /// HTTP status code for this kind of failure
    #[must_use]
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::UpstreamTimeout => 504,
            ErrorKind::UpstreamUnavailable => 502,
            ErrorKind::Internal => 500,
        }
    }
}

/// Main error type for the weather summary service
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// No dataset row matched the location filter
    #[error("No rows match the requested location")]
    NoMatchingLocation,

    /// Rows matched but none carried a usable temperature
    #[error("Matching rows contain no numeric temperature values")]
    NoTemperatureData,

    /// The geocoding provider had nothing usable for this ZIP
    #[error("No location found for ZIP code '{zip}'")]
    ZipNotFound { zip: String },

    /// The geocoding request exceeded its timeout
    #[error("Geocoding request timed out")]
    UpstreamTimeout,

    /// Any other transport or protocol failure talking to the provider
    #[error("Geocoding provider unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// The dataset could not be read or parsed
    #[error("Dataset unavailable: {message}")]
    DataUnavailable { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// General internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl WeatherError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    /// Create a new dataset error
    pub fn data_unavailable<S: Into<String>>(message: S) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Validation { .. } => ErrorKind::Validation,
            WeatherError::NoMatchingLocation
            | WeatherError::NoTemperatureData
            | WeatherError::ZipNotFound { .. } => ErrorKind::NotFound,
            WeatherError::UpstreamTimeout => ErrorKind::UpstreamTimeout,
            WeatherError::UpstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
            WeatherError::DataUnavailable { .. }
            | WeatherError::Config { .. }
            | WeatherError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get a user-facing error message. Never includes internal details.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Validation { message } => message.clone(),
            WeatherError::NoMatchingLocation => {
                "No weather data available for the specified location".to_string()
            }
            WeatherError::NoTemperatureData => "No valid temperature data available".to_string(),
            WeatherError::ZipNotFound { .. } => {
                "Location not found for the provided ZIP code".to_string()
            }
            WeatherError::UpstreamTimeout => {
                "Request timed out while resolving ZIP code".to_string()
            }
            WeatherError::UpstreamUnavailable { .. } => {
                "Failed to connect to location service".to_string()
            }
            WeatherError::DataUnavailable { .. }
            | WeatherError::Config { .. }
            | WeatherError::Internal { .. } => "Internal server error".to_string(),
        }
    }
}
