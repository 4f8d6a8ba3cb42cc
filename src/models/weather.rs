use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A city resolved by the geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
    pub name: String,
    /// Empty when the geocoder does not report a country.
    #[serde(default)]
    pub country: String,
}

/// Current conditions at a set of coordinates.
///
/// Numbers are kept as the upstream sent them, so `31.0` stays `31.0` and an
/// integer AQI stays an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Degrees Celsius.
    pub temperature: Number,
    /// WMO present-weather code.
    pub weathercode: i32,
    pub description: String,
    /// US AQI. Serialized as `"N/A"` when the air-quality source has no value.
    #[serde(default, with = "air_quality")]
    pub aqi: Option<Number>,
}

impl WeatherReading {
    /// AQI as display text.
    pub fn aqi_label(&self) -> String {
        match &self.aqi {
            Some(aqi) => aqi.to_string(),
            None => air_quality::UNAVAILABLE.to_string(),
        }
    }
}

/// Everything needed to render one city's weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Coordinates,
    pub weather: WeatherReading,
    pub summary: String,
}

mod air_quality {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::{Number, Value};

    pub const UNAVAILABLE: &str = "N/A";

    pub fn serialize<S: Serializer>(aqi: &Option<Number>, serializer: S) -> Result<S::Ok, S::Error> {
        match aqi {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_str(UNAVAILABLE),
        }
    }

    /// Anything but a number (the label, `null`, a missing field) reads as `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Number>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(value)) => Some(value),
            _ => None,
        })
    }
}
