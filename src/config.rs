//! Environment-driven configuration for both services.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

/// Open-Meteo endpoints used when no override is configured.
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

pub const DEFAULT_CITY: &str = "Manila";

/// Placeholder shipped in sample env files; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GROQ_API_KEY_HERE";

/// Configuration for the weather aggregator.
#[derive(Clone, Debug)]
pub struct WeatherConfig {
    /// Geocoding search endpoint (from GEOCODING_API_URL)
    pub geocoding_url: String,
    /// Current weather endpoint (from WEATHER_API_URL)
    pub weather_url: String,
    /// Air quality endpoint (from AIR_QUALITY_API_URL)
    pub air_quality_url: String,
    /// AI summary proxy (from GROQ_PROXY_URL)
    pub summary_proxy_url: Option<String>,
    /// Key forwarded to the summary proxy (from GROQ_API_KEY)
    pub summary_api_key: Option<String>,
    /// City shown on the HTML page when none is requested (from WEATHER_DEFAULT_CITY).
    /// `None` renders the search prompt instead.
    pub default_city: Option<String>,
    /// Timeout for geocoding, weather and air quality lookups.
    pub lookup_timeout: Duration,
    /// Timeout for the summary proxy.
    pub summary_timeout: Duration,
}

impl WeatherConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let default_city = match std::env::var("WEATHER_DEFAULT_CITY") {
            Ok(city) => non_empty(city),
            Err(_) => Some(DEFAULT_CITY.to_string()),
        };

        Self {
            geocoding_url: env_or("GEOCODING_API_URL", DEFAULT_GEOCODING_URL),
            weather_url: env_or("WEATHER_API_URL", DEFAULT_WEATHER_URL),
            air_quality_url: env_or("AIR_QUALITY_API_URL", DEFAULT_AIR_QUALITY_URL),
            summary_proxy_url: std::env::var("GROQ_PROXY_URL").ok().and_then(non_empty),
            summary_api_key: std::env::var("GROQ_API_KEY").ok().and_then(non_empty),
            default_city,
            ..Self::default()
        }
    }

    /// Point every upstream at one base URL (for testing against a mock server).
    ///
    /// Paths are `/geocode`, `/forecast`, `/air-quality` and `/summary`.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            geocoding_url: format!("{}/geocode", base),
            weather_url: format!("{}/forecast", base),
            air_quality_url: format!("{}/air-quality", base),
            summary_proxy_url: Some(format!("{}/summary", base)),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.summary_api_key = Some(key.into());
        self
    }

    pub fn with_default_city(mut self, city: Option<&str>) -> Self {
        self.default_city = city.map(str::to_string);
        self
    }

    /// The summary key, unless it is missing or still the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.summary_api_key
            .as_deref()
            .filter(|key| *key != PLACEHOLDER_API_KEY)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_string(),
            summary_proxy_url: None,
            summary_api_key: None,
            default_city: Some(DEFAULT_CITY.to_string()),
            lookup_timeout: Duration::from_secs(5),
            summary_timeout: Duration::from_secs(10),
        }
    }
}

/// Where the company database lives.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl DatabaseConfig {
    /// `DB_PATH` wins; otherwise `<data dir>/<DB_NAME>.db`, `DB_NAME` defaulting to `company_db`.
    pub fn from_env() -> Result<Self> {
        if let Some(path) = std::env::var("DB_PATH").ok().and_then(non_empty) {
            return Ok(Self {
                path: PathBuf::from(path),
            });
        }

        let name = env_or("DB_NAME", "company_db");
        let dirs = directories::ProjectDirs::from("", "", "manila")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self {
            path: dirs.data_dir().join(format!("{}.db", name)),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .and_then(non_empty)
        .unwrap_or_else(|| default.to_string())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
