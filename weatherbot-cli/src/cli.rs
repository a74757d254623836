use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use tracing::info;
use weatherbot_core::{Bot, Config, Credentials, LocationStore, clients_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "Weather chat bot console")]
pub struct Cli {
    /// Saved locations file; overrides the config file.
    #[arg(long, global = true)]
    pub locations: Option<PathBuf>,

    /// OpenWeather API base URL; overrides the config file.
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the stored configuration interactively.
    Configure,

    /// Send a single chat line, e.g. `!weather hourly Toronto`.
    Ask {
        /// Chat user id the line is sent as.
        #[arg(long)]
        user: String,

        /// The chat line.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },

    /// Read chat lines until cancelled.
    Chat {
        /// Chat user id the lines are sent as.
        #[arg(long)]
        user: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(locations) = self.locations {
            config.locations_file = locations;
        }
        if let Some(api_base) = self.api_base {
            config.api_base = api_base;
        }

        match self.command {
            Command::Configure => configure(config),
            Command::Ask { user, line } => {
                let bot = start_bot(&config)?;
                if let Some(reply) = bot.dispatch(&user, &line.join(" ")).await {
                    println!("{reply}");
                }
                Ok(())
            }
            Command::Chat { user } => {
                let bot = start_bot(&config)?;
                chat(&bot, &user).await
            }
        }
    }
}

fn start_bot(config: &Config) -> Result<Bot> {
    let credentials = Credentials::from_env()
        .context("Missing credentials; set DISCORD_TOKEN and OPENWEATHER_API_KEY")?;

    let store = LocationStore::open(&config.locations_file)
        .context("Failed to load saved locations")?;
    let (geocoder, weather) = clients_from_config(config, &credentials);

    info!(users = store.len(), api_base = %config.api_base, "🌦️ Logged in as weatherbot");
    Ok(Bot::new(Arc::new(store), geocoder, weather))
}

async fn chat(bot: &Bot, user: &str) -> Result<()> {
    loop {
        let line = match Text::new(">").with_help_message("Esc to quit").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read chat line"),
        };

        if let Some(reply) = bot.dispatch(user, &line).await {
            println!("{reply}");
        }
    }

    Ok(())
}

fn configure(mut config: Config) -> Result<()> {
    let api_base = Text::new("OpenWeather API base URL:")
        .with_default(&config.api_base)
        .prompt()
        .context("Failed to read API base URL")?;

    let locations = Text::new("Saved locations file:")
        .with_default(&config.locations_file.display().to_string())
        .prompt()
        .context("Failed to read locations file path")?;

    config.api_base = api_base.trim().to_string();
    config.locations_file = PathBuf::from(locations.trim());

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
