use std::sync::Arc;

use tracing::error;

use crate::{
    error::BotError,
    geocode::Geocoder,
    handler::{SetLocationCommand, WeatherCommand},
    location::LocationStore,
    provider::WeatherSource,
};

pub const COMMAND_PREFIX: char = '!';

/// A chat line addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    SetLocation { city: &'a str },
    Weather { args: &'a str },
}

impl<'a> Command<'a> {
    /// `None` for ordinary chat and unknown commands.
    pub fn parse(line: &'a str) -> Option<Self> {
        let body = line.trim().strip_prefix(COMMAND_PREFIX)?;
        let (name, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));

        match name {
            "setlocation" => Some(Command::SetLocation { city: rest.trim() }),
            "weather" => Some(Command::Weather { args: rest.trim() }),
            _ => None,
        }
    }
}

/// Routes parsed commands to their handlers.
#[derive(Debug, Clone)]
pub struct Bot {
    set_location: SetLocationCommand,
    weather: WeatherCommand,
}

impl Bot {
    pub fn new(
        store: Arc<LocationStore>,
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        Self {
            set_location: SetLocationCommand::new(store.clone()),
            weather: WeatherCommand::new(store, geocoder, weather),
        }
    }

    /// Run `line` for `user_id`; `None` when the line is not a bot command.
    pub async fn dispatch(&self, user_id: &str, line: &str) -> Option<String> {
        let reply = match Command::parse(line)? {
            // Saving rewrites a small file inline on this task.
            Command::SetLocation { city } => match self.set_location.handle(user_id, city) {
                Ok(reply) => reply,
                Err(err) => {
                    error!(user_id, error = %err, "failed to save location");
                    BotError::from(err).user_message()
                }
            },
            Command::Weather { args } => self.weather.handle(user_id, args).await,
        };
        Some(reply)
    }
}
