//! Command handlers: turn a chat command into exactly one reply.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    advisory::advisory_for,
    error::{BotError, PersistenceError},
    geocode::Geocoder,
    location::LocationStore,
    model::WeatherSnapshot,
    provider::WeatherSource,
    time::format_time,
};

const MAX_HOURLY: usize = 12;
const MAX_DAILY: usize = 7;

const INVALID_TIMEFRAME: &str = "❌ Invalid timeframe! Use `now`, `hourly`, or `daily`.";
const NO_HOURLY: &str = "⚠️ No hourly data available.";
const NO_DAILY: &str = "⚠️ No daily forecast data available.";
const SET_LOCATION_USAGE: &str = "Usage: `!setlocation [city]`";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Now,
    Hourly,
    Daily,
}

impl Timeframe {
    /// Case-insensitive; `None` for anything but `now`, `hourly` or `daily`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "now" => Some(Timeframe::Now),
            "hourly" => Some(Timeframe::Hourly),
            "daily" => Some(Timeframe::Daily),
            _ => None,
        }
    }
}

/// Arguments of `weather [timeframe] [city...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherArgs<'a> {
    pub timeframe: &'a str,
    pub city: Option<&'a str>,
}

impl<'a> WeatherArgs<'a> {
    /// First token is the timeframe (`now` when absent), the rest is a city override.
    pub fn parse(args: &'a str) -> Self {
        let args = args.trim();
        if args.is_empty() {
            return Self { timeframe: "now", city: None };
        }

        match args.split_once(char::is_whitespace) {
            Some((timeframe, rest)) => {
                let rest = rest.trim();
                Self {
                    timeframe,
                    city: (!rest.is_empty()).then_some(rest),
                }
            }
            None => Self { timeframe: args, city: None },
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherCommand {
    store: Arc<LocationStore>,
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
}

impl WeatherCommand {
    pub fn new(
        store: Arc<LocationStore>,
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        Self { store, geocoder, weather }
    }

    pub async fn handle(&self, user_id: &str, args: &str) -> String {
        match self.respond(user_id, args).await {
            Ok(reply) => reply,
            Err(err) => {
                match &err {
                    BotError::Upstream(source) => {
                        warn!(user_id, error = %source, "weather lookup failed")
                    }
                    _ => info!(user_id, %err, "weather command answered with guidance"),
                }
                err.user_message()
            }
        }
    }

    async fn respond(&self, user_id: &str, args: &str) -> Result<String, BotError> {
        let args = WeatherArgs::parse(args);

        let city = match args.city {
            Some(city) => city.to_string(),
            None => self.store.get(user_id).ok_or(BotError::NoLocationSet)?,
        };
        info!(user_id, %city, timeframe = args.timeframe, "weather command");

        let coords = self
            .geocoder
            .resolve(&city)
            .await?
            .ok_or_else(|| BotError::NotFound { city: city.clone() })?;

        let snapshot = self.weather.fetch_snapshot(coords).await?;

        let reply = match Timeframe::parse(args.timeframe) {
            Some(Timeframe::Now) => render_now(&city, &snapshot),
            Some(Timeframe::Hourly) => render_hourly(&city, &snapshot),
            Some(Timeframe::Daily) => render_daily(&city, &snapshot),
            None => INVALID_TIMEFRAME.to_string(),
        };
        Ok(reply)
    }
}

#[derive(Debug, Clone)]
pub struct SetLocationCommand {
    store: Arc<LocationStore>,
}

impl SetLocationCommand {
    pub fn new(store: Arc<LocationStore>) -> Self {
        Self { store }
    }

    /// Blank `city` gets the usage text and leaves the store untouched.
    pub fn handle(&self, user_id: &str, city: &str) -> Result<String, PersistenceError> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(SET_LOCATION_USAGE.to_string());
        }

        self.store.set(user_id, city)?;
        info!(user_id, %city, "location saved");

        Ok(format!("📍 Location set to **{city}**."))
    }
}

fn render_now(city: &str, snapshot: &WeatherSnapshot) -> String {
    let current = &snapshot.current;
    let desc = capitalize(&current.description);

    format!(
        "🌤️ **Current weather in {city}:**\n\
         Time: {}\n\
         Temperature: {}°C (Feels like {}°C)\n\
         Condition: {desc} {}\n\
         Humidity: {}%\n\
         Wind Speed: {} m/s",
        format_time(current.timestamp, snapshot.timezone_offset),
        current.temperature_c,
        current.feels_like_c,
        advisory_for(&desc),
        current.humidity_pct,
        current.wind_speed_ms,
    )
}

fn render_hourly(city: &str, snapshot: &WeatherSnapshot) -> String {
    if snapshot.hourly.is_empty() {
        return NO_HOURLY.to_string();
    }

    let mut output = format!("⏰ **Hourly forecast for {city} (next 12 hours):**\n");
    for hour in snapshot.hourly.iter().take(MAX_HOURLY) {
        let desc = capitalize(&hour.description);
        output.push_str(&format!(
            "{}: {}°C, {desc} {}\n",
            format_time(hour.timestamp, snapshot.timezone_offset),
            hour.temperature_c,
            advisory_for(&desc),
        ));
    }
    output
}

fn render_daily(city: &str, snapshot: &WeatherSnapshot) -> String {
    if snapshot.daily.is_empty() {
        return NO_DAILY.to_string();
    }

    let mut output = format!("📅 **7-day forecast for {city}:**\n");
    for day in snapshot.daily.iter().take(MAX_DAILY) {
        let desc = capitalize(&day.description);
        output.push_str(&format!(
            "{}: {}°C - {}°C, {desc} {}\n",
            format_time(day.timestamp, snapshot.timezone_offset),
            day.min_temperature_c,
            day.max_temperature_c,
            advisory_for(&desc),
        ));
    }
    output
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}
