use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::UpstreamError,
    http::{fetch_body, truncate_body},
    model::Coordinates,
};

const SERVICE: &str = "OpenWeather geocoding";

/// Resolves a free-text city name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` when the provider knows no place by that name.
    async fn resolve(&self, city: &str) -> Result<Option<Coordinates>, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    api_base: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherGeocoder {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    lat: f64,
    lon: f64,
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    async fn resolve(&self, city: &str) -> Result<Option<Coordinates>, UpstreamError> {
        let url = format!("{}/geo/1.0/direct", self.api_base.trim_end_matches('/'));
        debug!(%city, "geocoding city");

        let request = self.http.get(url).query(&[
            ("q", city),
            ("limit", "1"),
            ("appid", self.api_key.as_str()),
        ]);

        let (status, body) = fetch_body(SERVICE, request).await?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status,
                body: truncate_body(&body),
            });
        }

        let matches: Vec<GeoMatch> = serde_json::from_str(&body)
            .map_err(|source| UpstreamError::Malformed { service: SERVICE, source })?;

        Ok(matches.first().map(|m| Coordinates { lat: m.lat, lon: m.lon }))
    }
}
