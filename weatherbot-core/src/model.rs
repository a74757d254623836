use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Everything one One Call request returns for a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Shift in seconds from UTC for the requested location.
    pub timezone_offset: i64,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyConditions>,
    pub daily: Vec<DailyConditions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub timestamp: i64,
    pub temperature_c: Reading,
    pub feels_like_c: Reading,
    pub humidity_pct: u8,
    pub wind_speed_ms: Reading,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyConditions {
    pub timestamp: i64,
    pub temperature_c: Reading,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyConditions {
    pub timestamp: i64,
    pub description: String,
    pub min_temperature_c: Reading,
    pub max_temperature_c: Reading,
}

/// A provider measurement kept as the JSON number it arrived as, so `9`
/// displays as `9` and `9.0` as `9.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Reading(serde_json::Number);

impl Reading {
    /// `None` for NaN and infinities, which JSON cannot carry.
    pub fn from_f64(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(Reading)
    }

    pub fn value(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }
}

impl From<i64> for Reading {
    fn from(value: i64) -> Self {
        Reading(value.into())
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(json: &str) -> Reading {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn reading_displays_number_as_written() {
        assert_eq!(reading("9").to_string(), "9");
        assert_eq!(reading("9.0").to_string(), "9.0");
        assert_eq!(reading("-1.5").to_string(), "-1.5");
        assert_eq!(reading("12.34").to_string(), "12.34");
    }

    #[test]
    fn reading_exposes_numeric_value() {
        assert_eq!(reading("7").value(), 7.0);
        assert_eq!(reading("4.25").value(), 4.25);
        assert_eq!(Reading::from_f64(f64::NAN), None);
    }
}
