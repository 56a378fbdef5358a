//! Integration tests for the WeatherAPI provider and the store, against a
//! mock HTTP server.

use std::sync::Arc;

use weathernow_core::{
    AUTO_IP_QUERY, Config, Phase, WeatherApiProvider, WeatherError, WeatherProvider, WeatherStore,
    error::{CONFIGURATION_MESSAGE, FETCH_FAILED_MESSAGE},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const KEY: &str = "TEST_KEY";

/// Trimmed-down `forecast.json` payload, including fields the crate ignores.
fn forecast_response(name: &str, country: &str) -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": name,
            "region": "",
            "country": country,
            "lat": 48.87,
            "lon": 2.33,
            "tz_id": "Europe/Paris",
            "localtime_epoch": 1705325400,
            "localtime": "2024-01-15 14:30"
        },
        "current": {
            "last_updated": "2024-01-15 14:15",
            "temp_c": 7.0,
            "temp_f": 44.6,
            "is_day": 1,
            "condition": {
                "text": "Moderate rain",
                "icon": "//cdn.weatherapi.com/weather/64x64/day/302.png",
                "code": 1189
            },
            "wind_kph": 19.1,
            "wind_dir": "SW",
            "humidity": 87,
            "feelslike_c": 3.9,
            "feelslike_f": 39.0,
            "uv": 1.0
        },
        "forecast": {
            "forecastday": [
                {
                    "date": "2024-01-15",
                    "day": {
                        "maxtemp_c": 8.1, "maxtemp_f": 46.6,
                        "mintemp_c": 3.2, "mintemp_f": 37.8,
                        "condition": { "text": "Patchy rain possible", "icon": "", "code": 1063 }
                    },
                    "astro": { "sunrise": "08:40 AM", "sunset": "05:23 PM" }
                }
            ]
        }
    })
}

fn create_test_provider(mock_server: &MockServer) -> WeatherApiProvider {
    WeatherApiProvider::new(KEY.to_string(), mock_server.uri())
}

fn create_test_store(mock_server: &MockServer) -> WeatherStore {
    WeatherStore::new(Some(Arc::new(create_test_provider(mock_server))))
}

// ============================================================================
// Provider
// ============================================================================

#[tokio::test]
async fn provider_sends_forecast_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", KEY))
        .and(query_param("q", "Paris"))
        .and(query_param("days", "3"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(forecast_response("Paris", "France")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let result = provider.fetch_snapshot("Paris").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let snapshot = result.unwrap();
    assert_eq!(snapshot.location.name, "Paris");
    assert_eq!(snapshot.current.condition.code, 1189);
    assert_eq!(snapshot.current.humidity, 87);
    let forecast = snapshot.forecast.expect("forecast passthrough");
    assert_eq!(forecast.forecastday.len(), 1);
    assert_eq!(forecast.forecastday[0].astro.sunset, "05:23 PM");
}

#[tokio::test]
async fn provider_maps_unauthorized_to_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "code": 2006, "message": "API key is invalid." }
        })))
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.fetch_snapshot("Paris").await.unwrap_err();

    assert!(matches!(err, WeatherError::Transport { status: Some(401), .. }), "{err:?}");
    assert!(err.to_string().contains("API key is invalid"));
}

#[tokio::test]
async fn provider_maps_malformed_payload_to_application_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "location": {} })),
        )
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.fetch_snapshot("Paris").await.unwrap_err();

    assert!(matches!(err, WeatherError::Application { .. }), "{err:?}");
}

#[tokio::test]
async fn provider_maps_unreachable_host_to_transport_error() {
    // Nothing listens on port 1.
    let provider = WeatherApiProvider::new(KEY.to_string(), "http://127.0.0.1:1");
    let err = provider.fetch_snapshot("Paris").await.unwrap_err();

    assert!(matches!(err, WeatherError::Transport { status: None, .. }), "{err:?}");
}

// ============================================================================
// Store over HTTP
// ============================================================================

#[tokio::test]
async fn store_success_for_paris() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Paris"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(forecast_response("Paris", "France")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = create_test_store(&mock_server);
    store.fetch_weather(Some("Paris")).await;

    let state = store.state();
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert_eq!(state.location_query, "Paris");
    assert_eq!(state.snapshot.expect("snapshot").location.country, "France");
}

#[tokio::test]
async fn store_reports_generic_message_on_401() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let store = create_test_store(&mock_server);
    store.fetch_weather(Some("Paris")).await;

    let state = store.state();
    assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
    assert!(state.snapshot.is_none());
    assert!(!state.loading);
    assert_eq!(state.phase(), Phase::Failure);
}

#[tokio::test]
async fn store_bootstraps_location_from_ip_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", AUTO_IP_QUERY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(forecast_response("Lyon", "France")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = create_test_store(&mock_server);
    store.fetch_weather(None).await;

    assert_eq!(store.state().location_query, "Lyon");
}

#[tokio::test]
async fn store_uses_location_set_before_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Tokyo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response("Tokyo", "Japan")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = create_test_store(&mock_server);
    store.set_location("Tokyo");
    store.fetch_weather(None).await;

    assert_eq!(store.state().phase(), Phase::Success);
}

#[tokio::test]
async fn store_without_key_never_calls_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = Config { base_url: mock_server.uri(), ..Default::default() };
    let store = WeatherStore::from_config(&config).expect("store");
    store.fetch_weather(None).await;

    let state = store.state();
    assert_eq!(state.error.as_deref(), Some(CONFIGURATION_MESSAGE));
    assert!(!state.loading);
    assert!(state.snapshot.is_none());
}

#[tokio::test]
async fn store_from_config_honors_base_url_and_unit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(forecast_response("Paris", "France")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config {
        base_url: mock_server.uri(),
        default_unit: weathernow_core::TemperatureUnit::Fahrenheit,
        timeout_secs: Some(5),
        ..Default::default()
    };
    config.set_api_key(KEY.to_string());

    let store = WeatherStore::from_config(&config).expect("store");
    store.fetch_weather(Some("Paris")).await;

    let state = store.state();
    assert_eq!(state.phase(), Phase::Success);
    assert_eq!(state.temperature_unit, weathernow_core::TemperatureUnit::Fahrenheit);
}
