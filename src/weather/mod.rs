//! Weather aggregation: geocode a city, read its current conditions and ask
//! the summary proxy for a short report.

mod client;
pub mod wmo;

pub use client::{summary_prompt, WeatherClient, WeatherError};

use crate::config::WeatherConfig;
use crate::models::WeatherReport;

#[derive(Debug, Clone)]
pub struct WeatherService {
    client: WeatherClient,
}

impl WeatherService {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: WeatherClient::new(config),
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        self.client.config()
    }

    /// Full report for a city, or `None` when the city cannot be geocoded.
    ///
    /// A geocoder that errors or is unreachable counts as "no match". Failures
    /// further down (forecast, air quality) are returned as errors.
    pub async fn report(&self, city: &str) -> Result<Option<WeatherReport>, WeatherError> {
        let location = match self.client.geocode(city).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                tracing::debug!("No geocoding match for {:?}", city);
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Geocoding {:?} failed: {}", city, e);
                return Ok(None);
            }
        };

        let weather = self.client.current_conditions(&location).await?;
        let summary = self.client.summarize(&location, &weather).await;

        Ok(Some(WeatherReport {
            location,
            weather,
            summary,
        }))
    }
}
