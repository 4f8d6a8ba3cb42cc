use axum::http::StatusCode;
use axum_test::TestServer;
use httpmock::prelude::*;
use httpmock::Mock;
use manila_services::api::{create_weather_router, WeatherApiResponse};
use manila_services::config::WeatherConfig;
use manila_services::weather::WeatherService;
use serde_json::{json, Value};

const API_KEY: &str = "test-groq-key";

fn test_config(upstream: &MockServer) -> WeatherConfig {
    WeatherConfig::with_base_url(&upstream.base_url()).with_api_key(API_KEY)
}

fn setup(config: WeatherConfig) -> TestServer {
    let app = create_weather_router(WeatherService::new(config));
    TestServer::new(app).expect("Failed to create test server")
}

async fn mock_geocode<'a>(upstream: &'a MockServer, city: &str, body: Value) -> Mock<'a> {
    let city = city.to_string();
    upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path("/geocode")
                .query_param("name", &city)
                .query_param("count", "1")
                .query_param("language", "en")
                .query_param("format", "json");
            then.status(200).json_body(body);
        })
        .await
}

async fn mock_manila(upstream: &MockServer) -> Mock<'_> {
    mock_geocode(
        upstream,
        "Manila",
        json!({
            "results": [{
                "latitude": 14.6042,
                "longitude": 120.9822,
                "name": "Manila",
                "country": "Philippines"
            }]
        }),
    )
    .await
}

async fn mock_forecast(upstream: &MockServer, weathercode: i32) -> Mock<'_> {
    upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path("/forecast")
                .query_param("latitude", "14.6042")
                .query_param("longitude", "120.9822")
                .query_param("current_weather", "true");
            then.status(200).json_body(json!({
                "current_weather": { "temperature": 31.2, "weathercode": weathercode }
            }));
        })
        .await
}

async fn mock_air_quality(upstream: &MockServer, body: Value) -> Mock<'_> {
    upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path("/air-quality")
                .query_param("current", "us_aqi");
            then.status(200).json_body(body);
        })
        .await
}

async fn mock_summary(upstream: &MockServer, body: Value) -> Mock<'_> {
    upstream
        .mock_async(|when, then| {
            when.method(POST)
                .path("/summary")
                .body_contains(r#""api_key":"test-groq-key""#)
                .body_contains("The weather in Manila, Philippines is 31.2°C");
            then.status(200).json_body(body);
        })
        .await
}

/// Upstream doubles for a clear day in Manila.
async fn mock_clear_manila(upstream: &MockServer) {
    mock_manila(upstream).await;
    mock_forecast(upstream, 0).await;
    mock_air_quality(upstream, json!({ "current": { "us_aqi": 42 } })).await;
    mock_summary(upstream, json!({ "reply": "Sunny and sweaty. Stay hydrated!" })).await;
}

// ============================================================
// JSON API
// ============================================================

mod api_weather {
    use super::*;

    #[tokio::test]
    async fn returns_location_conditions_and_summary() {
        let upstream = MockServer::start_async().await;
        mock_clear_manila(&upstream).await;
        let server = setup(test_config(&upstream));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({
                "status": "success",
                "location": {
                    "lat": 14.6042,
                    "long": 120.9822,
                    "name": "Manila",
                    "country": "Philippines"
                },
                "data": {
                    "temperature": 31.2,
                    "weathercode": 0,
                    "description": "Clear sky",
                    "aqi": 42
                },
                "summary": "Sunny and sweaty. Stay hydrated!",
                "source": "Manila Weather App API"
            })
        );
    }

    #[tokio::test]
    async fn payload_deserializes_into_typed_response() {
        let upstream = MockServer::start_async().await;
        mock_clear_manila(&upstream).await;
        let server = setup(test_config(&upstream));

        let body: WeatherApiResponse = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await
            .json();

        assert_eq!(body.location.country, "Philippines");
        assert_eq!(body.data.aqi, Some(serde_json::Number::from(42)));
    }

    #[tokio::test]
    async fn missing_city_is_bad_request() {
        let upstream = MockServer::start_async().await;
        let geocode = mock_manila(&upstream).await;
        let server = setup(test_config(&upstream));

        let response = server.get("/api/weather").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "status": "error", "message": "Missing city parameter" })
        );
        geocode.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn blank_city_is_bad_request() {
        let upstream = MockServer::start_async().await;
        let server = setup(test_config(&upstream));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "   ")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let upstream = MockServer::start_async().await;
        // Open-Meteo omits `results` entirely when nothing matches
        mock_geocode(&upstream, "Atlantis", json!({ "generationtime_ms": 0.5 })).await;
        let forecast = mock_forecast(&upstream, 0).await;
        let server = setup(test_config(&upstream));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "Atlantis")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>(),
            json!({ "status": "error", "message": "City not found" })
        );
        forecast.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn empty_results_are_not_found() {
        let upstream = MockServer::start_async().await;
        mock_geocode(&upstream, "Nowhere", json!({ "results": [] })).await;
        let server = setup(test_config(&upstream));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "Nowhere")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn failing_geocoder_is_not_found() {
        let upstream = MockServer::start_async().await;
        let geocode = upstream
            .mock_async(|when, then| {
                when.method(GET).path("/geocode");
                then.status(503).body("geocoder down");
            })
            .await;
        let forecast = mock_forecast(&upstream, 0).await;
        let server = setup(test_config(&upstream));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>(),
            json!({ "status": "error", "message": "City not found" })
        );
        geocode.assert_hits_async(1).await;
        forecast.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn whole_number_readings_pass_through_unchanged() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        upstream
            .mock_async(|when, then| {
                when.method(GET).path("/forecast");
                then.status(200).json_body(json!({
                    "current_weather": { "temperature": 31.0, "weathercode": 1 }
                }));
            })
            .await;
        mock_air_quality(&upstream, json!({ "current": { "us_aqi": 57 } })).await;
        let server = setup(WeatherConfig::with_base_url(&upstream.base_url()));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains(r#""temperature":31.0"#), "got {text}");
        assert!(text.contains(r#""aqi":57"#), "got {text}");
        assert!(!text.contains("57.0"), "got {text}");
    }

    #[tokio::test]
    async fn failing_forecast_is_server_error() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        upstream
            .mock_async(|when, then| {
                when.method(GET).path("/forecast");
                then.status(503).body("upstream down");
            })
            .await;
        let summary = mock_summary(&upstream, json!({ "reply": "unused" })).await;
        let server = setup(test_config(&upstream));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Weather service request failed"));
        summary.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn missing_air_quality_is_reported_as_not_available() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        mock_forecast(&upstream, 61).await;
        mock_air_quality(&upstream, json!({ "current": { "us_aqi": null } })).await;
        upstream
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/summary")
                    .body_contains("The Air Quality Index (AQI) is N/A.");
                then.status(200).json_body(json!({ "reply": "Wet." }));
            })
            .await;
        let server = setup(test_config(&upstream));

        let body = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await
            .json::<Value>();

        assert_eq!(body["data"]["aqi"], "N/A");
        assert_eq!(body["data"]["description"], "Raining");
        assert_eq!(body["summary"], "Wet.");
    }

    #[tokio::test]
    async fn failing_air_quality_is_server_error() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        mock_forecast(&upstream, 3).await;
        upstream
            .mock_async(|when, then| {
                when.method(GET).path("/air-quality");
                then.status(500);
            })
            .await;
        let summary = mock_summary(&upstream, json!({ "reply": "unused" })).await;
        let server = setup(test_config(&upstream));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["status"], "error");
        summary.assert_hits_async(0).await;
    }
}

// ============================================================
// Summary fallbacks
// ============================================================

mod summary {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_skips_the_proxy() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        mock_forecast(&upstream, 0).await;
        mock_air_quality(&upstream, json!({ "current": { "us_aqi": 12 } })).await;
        let proxy = mock_summary(&upstream, json!({ "reply": "unused" })).await;
        let server = setup(WeatherConfig::with_base_url(&upstream.base_url()));

        let body = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await
            .json::<Value>();

        assert_eq!(body["summary"], "Error: GROQ_API_KEY not set.");
        proxy.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn placeholder_api_key_counts_as_missing() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        mock_forecast(&upstream, 0).await;
        mock_air_quality(&upstream, json!({ "current": { "us_aqi": 12 } })).await;
        let config = WeatherConfig::with_base_url(&upstream.base_url())
            .with_api_key("YOUR_GROQ_API_KEY_HERE");
        let server = setup(config);

        let body = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await
            .json::<Value>();

        assert_eq!(body["summary"], "Error: GROQ_API_KEY not set.");
    }

    #[tokio::test]
    async fn reply_without_text_falls_back() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        mock_forecast(&upstream, 0).await;
        mock_air_quality(&upstream, json!({ "current": { "us_aqi": 12 } })).await;
        mock_summary(&upstream, json!({ "detail": "model busy" })).await;
        let server = setup(test_config(&upstream));

        let body = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await
            .json::<Value>();

        assert_eq!(body["summary"], "No summary available.");
    }

    #[tokio::test]
    async fn proxy_failure_is_reported_inline() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        mock_forecast(&upstream, 0).await;
        mock_air_quality(&upstream, json!({ "current": { "us_aqi": 12 } })).await;
        upstream
            .mock_async(|when, then| {
                when.method(POST).path("/summary");
                then.status(502).body("<html>bad gateway</html>");
            })
            .await;
        let server = setup(test_config(&upstream));

        let response = server
            .get("/api/weather")
            .add_query_param("city", "Manila")
            .await;

        response.assert_status_ok();
        let summary = response.json::<Value>()["summary"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(summary.starts_with("AI Error:"), "got {summary}");
    }
}

// ============================================================
// HTML page
// ============================================================

mod home_page {
    use super::*;

    #[tokio::test]
    async fn defaults_to_manila() {
        let upstream = MockServer::start_async().await;
        mock_clear_manila(&upstream).await;
        let server = setup(test_config(&upstream));

        let response = server.get("/").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Manila</h2>"));
        assert!(html.contains("Philippines"));
        assert!(html.contains("31.2°"));
        assert!(html.contains("Clear sky"));
        assert!(html.contains(r#"text-green-500">42</span>"#));
        assert!(html.contains("Sunny and sweaty. Stay hydrated!"));
        assert!(html.contains("/api/weather?city=Manila"));
    }

    #[tokio::test]
    async fn unknown_city_renders_escaped_error() {
        let upstream = MockServer::start_async().await;
        mock_geocode(&upstream, "<Atlantis>", json!({ "results": [] })).await;
        let server = setup(test_config(&upstream));

        let response = server.get("/").add_query_param("city", "<Atlantis>").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let html = response.text();
        assert!(html.contains("City &#x27;&lt;Atlantis&gt;&#x27; not found."));
    }

    #[tokio::test]
    async fn failing_geocoder_renders_not_found() {
        let upstream = MockServer::start_async().await;
        upstream
            .mock_async(|when, then| {
                when.method(GET).path("/geocode");
                then.status(503);
            })
            .await;
        let server = setup(test_config(&upstream));

        let response = server.get("/").add_query_param("city", "Tokyo").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("City &#x27;Tokyo&#x27; not found."));
    }

    #[tokio::test]
    async fn upstream_failure_renders_error() {
        let upstream = MockServer::start_async().await;
        mock_manila(&upstream).await;
        upstream
            .mock_async(|when, then| {
                when.method(GET).path("/forecast");
                then.status(500);
            })
            .await;
        let server = setup(test_config(&upstream));

        let response = server.get("/").add_query_param("city", "Manila").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("Weather service request failed"));
    }

    #[tokio::test]
    async fn prompt_is_shown_without_default_city() {
        let upstream = MockServer::start_async().await;
        let server = setup(test_config(&upstream).with_default_city(None));

        let response = server.get("/").await;

        response.assert_status_ok();
        assert!(response
            .text()
            .contains("Search for a city to see the forecast."));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let upstream = MockServer::start_async().await;
        let server = setup(test_config(&upstream));

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
    }
}
