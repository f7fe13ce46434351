//! ZIP code resolution against an OpenCage-compatible geocoding API
//!
//! One request per call, bounded by the client timeout, never retried.
//! Timeouts and other transport failures surface as distinct errors.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::WeatherError;
use crate::models::ResolvedLocation;
use crate::normalize::{ZipToken, sanitize};

const USER_AGENT: &str = concat!("weather-summary/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    components: Components,
}

#[derive(Debug, Default, Deserialize)]
struct Components {
    country: Option<String>,
    city: Option<String>,
    town: Option<String>,
}

impl Components {
    /// `city`, or `town` when the city is missing or blank
    fn place(&self) -> Option<&str> {
        [self.city.as_deref(), self.town.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

/// HTTP client for the geocoding provider
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeocodeClient {
    /// Create a client from configuration
    pub fn new(config: &GeocodingConfig) -> crate::Result<Self> {
        Self::with_base_url(
            &config.base_url,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Create a client against an explicit endpoint
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve a ZIP code to the first result's country and town
    #[instrument(skip_all, fields(zip = %zip))]
    pub async fn resolve_zip(&self, zip: &ZipToken) -> crate::Result<ResolvedLocation> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| WeatherError::config("geocoding API key is not configured"))?;

        let url = format!(
            "{}/geocode/v1/json?q={}&key={}",
            self.base_url,
            urlencoding::encode(zip.as_str()),
            urlencoding::encode(api_key)
        );
        debug!(base_url = %self.base_url, "Calling geocoding API");
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Geocoding API returned an error status");
            return Err(WeatherError::upstream(format!(
                "geocoding API responded with {status}"
            )));
        }

        let body: GeocodeResponse = response.json().await.map_err(transport_error)?;
        debug!(
            results = body.results.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Geocoding response received"
        );

        let Some(first) = body.results.into_iter().next() else {
            info!("No geocoding results");
            return Err(WeatherError::ZipNotFound {
                zip: zip.to_string(),
            });
        };

        let country = sanitize(first.components.country.as_deref().unwrap_or_default());
        let town = sanitize(first.components.place().unwrap_or_default());
        if country.is_empty() && town.is_empty() {
            info!("First geocoding result has no usable country or town");
            return Err(WeatherError::ZipNotFound {
                zip: zip.to_string(),
            });
        }

        info!(%country, %town, "Resolved ZIP code");
        Ok(ResolvedLocation::new(country, town))
    }
}

fn transport_error(e: reqwest::Error) -> WeatherError {
    if e.is_timeout() {
        warn!("Geocoding request timed out");
        WeatherError::UpstreamTimeout
    } else {
        warn!(error = %e, "Geocoding request failed");
        WeatherError::upstream(e.without_url().to_string())
    }
}
