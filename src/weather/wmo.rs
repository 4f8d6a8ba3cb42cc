//! WMO present-weather codes as reported by Open-Meteo.

/// Human-readable description of a WMO weather code.
pub fn describe(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        45 | 48 => "Foggy",
        51 | 53 | 55 | 56 | 57 => "Drizzling",
        61 | 63 | 65 | 66 | 67 => "Raining",
        80..=82 => "Rain showers",
        95 | 96 | 99 => "Thunderstorm",
        _ => "Unknown weather",
    }
}
