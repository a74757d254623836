use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::UpstreamError,
    http::{fetch_body, truncate_body},
    model::{
        Coordinates, CurrentConditions, DailyConditions, HourlyConditions, Reading,
        WeatherSnapshot,
    },
};

use super::WeatherSource;

const SERVICE: &str = "OpenWeather One Call";

/// Client for the One Call endpoint: current, hourly and daily data in one request.
#[derive(Debug, Clone)]
pub struct OneCallClient {
    api_base: String,
    api_key: String,
    http: Client,
}

impl OneCallClient {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OcWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OcCurrent {
    dt: i64,
    temp: Reading,
    feels_like: Reading,
    humidity: u8,
    wind_speed: Reading,
    weather: Vec<OcWeather>,
}

#[derive(Debug, Deserialize)]
struct OcHourly {
    dt: i64,
    temp: Reading,
    weather: Vec<OcWeather>,
}

#[derive(Debug, Deserialize)]
struct OcDailyTemp {
    min: Reading,
    max: Reading,
}

#[derive(Debug, Deserialize)]
struct OcDaily {
    dt: i64,
    temp: OcDailyTemp,
    weather: Vec<OcWeather>,
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    #[serde(default)]
    timezone_offset: i64,
    current: Option<OcCurrent>,
    #[serde(default)]
    hourly: Vec<OcHourly>,
    #[serde(default)]
    daily: Vec<OcDaily>,
}

impl OcResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, UpstreamError> {
        let current = self.current.ok_or(UpstreamError::MissingField {
            service: SERVICE,
            field: "current",
        })?;

        let current = CurrentConditions {
            timestamp: current.dt,
            temperature_c: current.temp,
            feels_like_c: current.feels_like,
            humidity_pct: current.humidity,
            wind_speed_ms: current.wind_speed,
            description: first_description(current.weather)?,
        };

        let hourly = self
            .hourly
            .into_iter()
            .map(|h| {
                Ok(HourlyConditions {
                    timestamp: h.dt,
                    temperature_c: h.temp,
                    description: first_description(h.weather)?,
                })
            })
            .collect::<Result<Vec<_>, UpstreamError>>()?;

        let daily = self
            .daily
            .into_iter()
            .map(|d| {
                Ok(DailyConditions {
                    timestamp: d.dt,
                    description: first_description(d.weather)?,
                    min_temperature_c: d.temp.min,
                    max_temperature_c: d.temp.max,
                })
            })
            .collect::<Result<Vec<_>, UpstreamError>>()?;

        Ok(WeatherSnapshot {
            timezone_offset: self.timezone_offset,
            current,
            hourly,
            daily,
        })
    }
}

fn first_description(weather: Vec<OcWeather>) -> Result<String, UpstreamError> {
    weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or(UpstreamError::MissingField {
            service: SERVICE,
            field: "weather",
        })
}

#[async_trait]
impl WeatherSource for OneCallClient {
    async fn fetch_snapshot(&self, coords: Coordinates) -> Result<WeatherSnapshot, UpstreamError> {
        let url = format!("{}/data/2.5/onecall", self.api_base.trim_end_matches('/'));
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();
        debug!(%lat, %lon, "fetching weather snapshot");

        let request = self.http.get(url).query(&[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("exclude", "minutely,alerts"),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]);

        let (status, body) = fetch_body(SERVICE, request).await?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OcResponse = serde_json::from_str(&body)
            .map_err(|source| UpstreamError::Malformed { service: SERVICE, source })?;

        parsed.into_snapshot()
    }
}
