//! HTTP client for the upstream weather APIs and the AI summary proxy.
//!
//! Request and response shapes follow Open-Meteo's geocoding, forecast and
//! air-quality APIs. Every call is a single attempt with a fixed timeout.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

use crate::config::WeatherConfig;
use crate::models::{Coordinates, WeatherReading};
use crate::weather::wmo;

/// Upstream lookup errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct GeocodeQuery<'a> {
    name: &'a str,
    count: u32,
    language: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    latitude: f64,
    longitude: f64,
    name: String,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Serialize)]
struct ForecastQuery {
    latitude: f64,
    longitude: f64,
    current_weather: bool,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Deserialize)]
struct CurrentWeather {
    temperature: Number,
    weathercode: i32,
}

#[derive(Serialize)]
struct AirQualityQuery<'a> {
    latitude: f64,
    longitude: f64,
    current: &'a str,
}

#[derive(Deserialize)]
struct AirQualityResponse {
    #[serde(default)]
    current: Option<CurrentAirQuality>,
}

#[derive(Deserialize)]
struct CurrentAirQuality {
    #[serde(default)]
    us_aqi: Option<Number>,
}

#[derive(Serialize)]
struct SummaryRequest<'a> {
    api_key: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    reply: Option<String>,
}

/// Client for geocoding, current conditions, air quality and summaries.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    config: WeatherConfig,
    client: Client,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Resolve a city name to coordinates. `None` when the geocoder has no match.
    pub async fn geocode(&self, city: &str) -> Result<Option<Coordinates>, WeatherError> {
        let response: GeocodeResponse = self
            .client
            .get(&self.config.geocoding_url)
            .query(&GeocodeQuery {
                name: city,
                count: 1,
                language: "en",
                format: "json",
            })
            .timeout(self.config.lookup_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.results.into_iter().next().map(|r| Coordinates {
            lat: r.latitude,
            long: r.longitude,
            name: r.name,
            country: r.country.unwrap_or_default(),
        }))
    }

    /// Current weather plus air quality at the given coordinates.
    ///
    /// `aqi` is empty when the air-quality response carries no `us_aqi`. A
    /// failing air-quality request fails the reading like the forecast does.
    pub async fn current_conditions(
        &self,
        coords: &Coordinates,
    ) -> Result<WeatherReading, WeatherError> {
        let forecast: ForecastResponse = self
            .client
            .get(&self.config.weather_url)
            .query(&ForecastQuery {
                latitude: coords.lat,
                longitude: coords.long,
                current_weather: true,
            })
            .timeout(self.config.lookup_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let aqi = self.air_quality(coords).await?;

        let current = forecast.current_weather;
        Ok(WeatherReading {
            temperature: current.temperature,
            weathercode: current.weathercode,
            description: wmo::describe(current.weathercode).to_string(),
            aqi,
        })
    }

    async fn air_quality(&self, coords: &Coordinates) -> Result<Option<Number>, WeatherError> {
        let response: AirQualityResponse = self
            .client
            .get(&self.config.air_quality_url)
            .query(&AirQualityQuery {
                latitude: coords.lat,
                longitude: coords.long,
                current: "us_aqi",
            })
            .timeout(self.config.lookup_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.current.and_then(|c| c.us_aqi))
    }

    /// Ask the summary proxy for a short report. Failures come back as text.
    pub async fn summarize(&self, coords: &Coordinates, reading: &WeatherReading) -> String {
        let Some(api_key) = self.config.usable_api_key() else {
            return "Error: GROQ_API_KEY not set.".to_string();
        };
        let Some(proxy_url) = self.config.summary_proxy_url.as_deref() else {
            return "Error: GROQ_PROXY_URL not set.".to_string();
        };

        let prompt = summary_prompt(coords, reading);
        match self.request_summary(proxy_url, api_key, &prompt).await {
            Ok(Some(reply)) => reply,
            Ok(None) => "No summary available.".to_string(),
            Err(e) => {
                tracing::warn!("Summary proxy failed: {}", e);
                format!("AI Error: {}", e)
            }
        }
    }

    async fn request_summary(
        &self,
        proxy_url: &str,
        api_key: &str,
        prompt: &str,
    ) -> Result<Option<String>, reqwest::Error> {
        let response: SummaryResponse = self
            .client
            .post(proxy_url)
            .json(&SummaryRequest { api_key, prompt })
            .timeout(self.config.summary_timeout)
            .send()
            .await?
            .json()
            .await?;
        Ok(response.reply)
    }
}

/// Prompt sent to the summary proxy.
pub fn summary_prompt(coords: &Coordinates, reading: &WeatherReading) -> String {
    format!(
        "The weather in {}, {} is {}°C and {}. The Air Quality Index (AQI) is {}. \
         Write a short, witty 2-sentence weather report for a visitor.",
        coords.name,
        coords.country,
        reading.temperature,
        reading.description,
        reading.aqi_label()
    )
}
