use std::path::PathBuf;

use thiserror::Error;

/// A provider call that produced no usable data.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {service} failed")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with status {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse {service} response")]
    Malformed {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} response is missing `{field}`")]
    MissingField {
        service: &'static str,
        field: &'static str,
    },
}

/// Failure to read or write the saved locations file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read locations file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locations file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize saved locations")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write locations file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcomes that end a chat command early.
///
/// Every variant maps to exactly one reply through [`BotError::user_message`].
#[derive(Debug, Error)]
pub enum BotError {
    #[error("no location set for user")]
    NoLocationSet,

    #[error("could not find location: {city}")]
    NotFound { city: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl BotError {
    pub fn user_message(&self) -> String {
        match self {
            BotError::NoLocationSet => "❌ No location set. Use `!setlocation [city]` or add a city \
                 to the command like `!weather now Toronto`."
                .to_string(),
            BotError::NotFound { city } => format!("❌ Could not find location: **{city}**"),
            BotError::Upstream(_) => {
                "⚠️ Failed to retrieve weather data. Try again later.".to_string()
            }
            BotError::Persistence(_) => {
                "⚠️ Could not save your location. Try again later.".to_string()
            }
        }
    }
}
