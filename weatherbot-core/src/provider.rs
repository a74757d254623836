use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    config::{Config, Credentials},
    error::UpstreamError,
    geocode::{Geocoder, OpenWeatherGeocoder},
    model::{Coordinates, WeatherSnapshot},
};

pub mod openweather;

pub use openweather::OneCallClient;

/// Fetches current, hourly and daily conditions for a coordinate pair.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_snapshot(&self, coords: Coordinates) -> Result<WeatherSnapshot, UpstreamError>;
}

/// Build the OpenWeather geocoder and weather client from config and credentials.
pub fn clients_from_config(
    config: &Config,
    credentials: &Credentials,
) -> (Arc<dyn Geocoder>, Arc<dyn WeatherSource>) {
    let geocoder = OpenWeatherGeocoder::new(&config.api_base, &credentials.weather_api_key);
    let weather = OneCallClient::new(&config.api_base, &credentials.weather_api_key);

    (Arc::new(geocoder), Arc::new(weather))
}
