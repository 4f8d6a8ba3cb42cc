use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::page::{self, PageView};
use crate::models::{Coordinates, WeatherReading};
use crate::weather::WeatherService;

pub const API_SOURCE: &str = "Manila Weather App API";

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

impl CityQuery {
    fn city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Successful `/api/weather` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiResponse {
    pub status: String,
    pub location: Coordinates,
    pub data: WeatherReading,
    pub summary: String,
    pub source: String,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "status": "error", "message": message.into() })),
    )
        .into_response()
}

// ============================================================
// Human interface
// ============================================================

pub async fn home(
    State(service): State<WeatherService>,
    Query(query): Query<CityQuery>,
) -> Response {
    let city = match query.city() {
        Some(city) => city.to_string(),
        None => match service.config().default_city.clone() {
            Some(city) => city,
            None => return Html(page::render(PageView::Prompt)).into_response(),
        },
    };

    match service.report(&city).await {
        Ok(Some(report)) => Html(page::render(PageView::Report(&report))).into_response(),
        Ok(None) => {
            let message = format!("City '{}' not found.", city);
            (
                StatusCode::NOT_FOUND,
                Html(page::render(PageView::Error(&message))),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Weather lookup for {:?} failed: {}", city, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(page::render(PageView::Error(&e.to_string()))),
            )
                .into_response()
        }
    }
}

// ============================================================
// Machine interface
// ============================================================

pub async fn api_weather(
    State(service): State<WeatherService>,
    Query(query): Query<CityQuery>,
) -> Response {
    let Some(city) = query.city() else {
        return api_error(StatusCode::BAD_REQUEST, "Missing city parameter");
    };

    match service.report(city).await {
        Ok(Some(report)) => Json(WeatherApiResponse {
            status: "success".to_string(),
            location: report.location,
            data: report.weather,
            summary: report.summary,
            source: API_SOURCE.to_string(),
        })
        .into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "City not found"),
        Err(e) => {
            tracing::error!("Weather lookup for {:?} failed: {}", city, e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
