//! End-to-end tests driving the HTTP router in-process

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use weather_summary::{AppState, GeocodeClient, WeatherTable, web};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DATASET: &str = "\
country,location_name,last_updated,temperature_celsius
USA,Boston,2024-05-16 10:00,10
usa,Chicago,2024-05-16 10:00,30
France,Paris,2024-05-16 10:00,n/a
Germany,Berlin,2024-05-16 10:00,12.346
";

fn app_with(geocoder: GeocodeClient) -> Router {
    let table = WeatherTable::from_reader(DATASET.as_bytes()).unwrap();
    web::app(AppState::new(table, geocoder), None)
}

/// App whose geocoder points at a port nothing listens on
fn offline_app() -> Router {
    let geocoder = GeocodeClient::with_base_url(
        "http://127.0.0.1:9",
        Some("test-key".into()),
        Duration::from_secs(1),
    )
    .unwrap();
    app_with(geocoder)
}

fn mocked_app(server: &MockServer, timeout: Duration) -> Router {
    let geocoder =
        GeocodeClient::with_base_url(&server.uri(), Some("test-key".into()), timeout).unwrap();
    app_with(geocoder)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_home() {
    let (status, body) = get(offline_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Weather Prediction API!");
}

#[tokio::test]
async fn test_countries() {
    let (status, body) = get(offline_app(), "/countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"countries": ["france", "germany", "usa"]}));
}

#[tokio::test]
async fn test_towns() {
    let (status, body) = get(offline_app(), "/towns").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"towns": ["berlin", "boston", "chicago", "paris"]}));
}

#[tokio::test]
async fn test_predict_by_country() {
    let (status, body) = get(offline_app(), "/predict?country=usa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"summary": {
            "max": "30.0 °C",
            "average": "20.0 °C",
            "min": "10.0 °C",
            "data_points": 2
        }})
    );
}

#[tokio::test]
async fn test_predict_sanitizes_and_rounds() {
    let (status, body) = get(offline_app(), "/predict?town=%20BERLIN!%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["max"], "12.35 °C");
    assert_eq!(body["summary"]["data_points"], 1);
}

#[tokio::test]
async fn test_predict_country_or_town() {
    let (status, body) = get(offline_app(), "/predict?country=germany&town=boston").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["min"], "10.0 °C");
    assert_eq!(body["summary"]["data_points"], 2);
}

#[tokio::test]
async fn test_predict_repeated_parameter_uses_first_value() {
    let (status, body) = get(offline_app(), "/predict?country=usa&country=usa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["data_points"], 2);

    let (status, body) = get(offline_app(), "/predict?country=germany&country=usa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["data_points"], 1);
}

#[tokio::test]
async fn test_predict_requires_a_location() {
    let (status, body) = get(offline_app(), "/predict").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide either a country or town");

    let (status, _) = get(offline_app(), "/predict?country=%21%21&town=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_unknown_location() {
    let (status, body) = get(offline_app(), "/predict?country=atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No weather data available for the specified location");
}

#[tokio::test]
async fn test_predict_no_numeric_temperatures() {
    let (status, body) = get(offline_app(), "/predict?country=france").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No valid temperature data available");
}

#[tokio::test]
async fn test_resolve_zip_empty_is_rejected_before_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = get(mocked_app(&server, Duration::from_secs(5)), "/resolve_zip?zip=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide a ZIP code");

    let (status, _) = get(mocked_app(&server, Duration::from_secs(5)), "/resolve_zip").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_resolve_zip_invalid_format() {
    let (status, body) = get(offline_app(), "/resolve_zip?zip=12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ZIP code format");
}

#[tokio::test]
async fn test_resolve_zip_repeated_parameter_uses_first_value() {
    let (status, body) = get(offline_app(), "/resolve_zip?zip=12&zip=02139").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ZIP code format");
}

#[tokio::test]
async fn test_resolve_zip_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"components": {"country": "United States", "town": "Cambridge"}}]
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        mocked_app(&server, Duration::from_secs(5)),
        "/resolve_zip?zip=02139",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"country": "united states", "town": "cambridge"}));
}

#[tokio::test]
async fn test_resolve_zip_no_results_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let (status, body) = get(
        mocked_app(&server, Duration::from_secs(5)),
        "/resolve_zip?zip=99999",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Location not found for the provided ZIP code");
}

#[tokio::test]
async fn test_resolve_zip_timeout_is_gateway_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let (status, body) = get(
        mocked_app(&server, Duration::from_millis(100)),
        "/resolve_zip?zip=12345",
    )
    .await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "Request timed out while resolving ZIP code");
}

#[tokio::test]
async fn test_resolve_zip_upstream_error_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = get(
        mocked_app(&server, Duration::from_secs(5)),
        "/resolve_zip?zip=12345",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to connect to location service");
}

#[tokio::test]
async fn test_resolve_zip_unreachable_is_bad_gateway() {
    let (status, _) = get(offline_app(), "/resolve_zip?zip=12345").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_resolve_zip_without_key_is_internal_error() {
    let geocoder =
        GeocodeClient::with_base_url("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
    let (status, body) = get(app_with(geocoder), "/resolve_zip?zip=12345").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_cors_headers_present() {
    let response = offline_app()
        .oneshot(
            Request::builder()
                .uri("/countries")
                .header("Origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}
