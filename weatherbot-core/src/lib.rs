//! Core library for the weather chat bot.
//!
//! This crate defines:
//! - Per-user saved locations
//! - OpenWeather geocoding and One Call clients
//! - Advisory and time formatting helpers
//! - The `setlocation` and `weather` command handlers
//!
//! It is used by `weatherbot-cli`, but any chat platform adapter can drive
//! [`Bot::dispatch`] the same way.

pub mod advisory;
pub mod command;
pub mod config;
pub mod error;
pub mod geocode;
pub mod handler;
mod http;
pub mod location;
pub mod model;
pub mod provider;
pub mod time;

pub use command::{Bot, Command};
pub use config::{Config, Credentials};
pub use error::{BotError, PersistenceError, UpstreamError};
pub use geocode::{Geocoder, OpenWeatherGeocoder};
pub use location::LocationStore;
pub use model::{Coordinates, Reading, WeatherSnapshot};
pub use provider::{OneCallClient, WeatherSource, clients_from_config};
