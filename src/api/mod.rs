use std::sync::Arc;

use axum::{
    Router,
    extract::{FromRequestParts, Query, State},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{
    dataset::WeatherTable,
    error::{ErrorKind, WeatherError},
    geocode::GeocodeClient,
    models::{ResolvedLocation, summary::FormattedSummary},
    normalize::{NormalizedToken, ZipToken, sanitize_optional},
    query::{self, LocationFilter},
};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<WeatherTable>,
    pub geocoder: Arc<GeocodeClient>,
}

impl AppState {
    #[must_use]
    pub fn new(table: WeatherTable, geocoder: GeocodeClient) -> Self {
        Self {
            table: Arc::new(table),
            geocoder: Arc::new(geocoder),
        }
    }
}

#[derive(Serialize)]
pub struct ApiMessage {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Serialize)]
pub struct ApiCountries {
    pub countries: Vec<NormalizedToken>,
}

#[derive(Serialize)]
pub struct ApiTowns {
    pub towns: Vec<NormalizedToken>,
}

#[derive(Serialize)]
pub struct ApiPrediction {
    pub summary: FormattedSummary,
}

/// Query string pairs in request order. A repeated key answers with its
/// first value.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = WeatherError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) =
            Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|e| {
                debug!(error = %e, "Unparseable query string");
                WeatherError::validation("Invalid query string")
            })?;
        Ok(Self(pairs))
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        if kind == ErrorKind::Internal {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }

        let status = StatusCode::from_u16(kind.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ApiError {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/countries", get(get_countries))
        .route("/towns", get(get_towns))
        .route("/resolve_zip", get(resolve_zip))
        .route("/predict", get(predict))
        .with_state(state)
}

async fn home() -> Json<ApiMessage> {
    Json(ApiMessage {
        message: "Welcome to the Weather Prediction API!",
    })
}

async fn get_countries(State(state): State<AppState>) -> Json<ApiCountries> {
    Json(ApiCountries {
        countries: query::list_countries(&state.table),
    })
}

async fn get_towns(State(state): State<AppState>) -> Json<ApiTowns> {
    Json(ApiTowns {
        towns: query::list_towns(&state.table),
    })
}

async fn resolve_zip(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<ResolvedLocation>, WeatherError> {
    let token = sanitize_optional(params.first("zip"));
    if token.is_empty() {
        return Err(WeatherError::validation("Please provide a ZIP code"));
    }
    let zip =
        ZipToken::parse(token).ok_or_else(|| WeatherError::validation("Invalid ZIP code format"))?;

    let location = state.geocoder.resolve_zip(&zip).await?;
    Ok(Json(location))
}

async fn predict(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<ApiPrediction>, WeatherError> {
    let filter = LocationFilter::new(
        sanitize_optional(params.first("country")),
        sanitize_optional(params.first("town")),
    )?;

    let table = Arc::clone(&state.table);
    let summary = tokio::task::spawn_blocking(move || query::predict(&table, &filter))
        .await
        .map_err(|e| WeatherError::internal(format!("predict task failed: {e}")))??;

    Ok(Json(ApiPrediction {
        summary: summary.formatted(),
    }))
}
