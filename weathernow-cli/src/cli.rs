use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use weathernow_core::{Config, TemperatureUnit, WeatherStore};

use crate::{dashboard, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Current weather in your terminal")]
pub struct Cli {
    /// Defaults to `dashboard`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store your WeatherAPI.com key and preferred unit.
    Configure,

    /// Interactive dashboard: search locations and toggle units.
    Dashboard,

    /// Show current weather once and exit.
    Show {
        /// City, zip code or coordinates; your IP location if absent.
        location: Option<String>,

        /// `celsius`/`c` or `fahrenheit`/`f`; the configured unit if absent.
        #[arg(long)]
        unit: Option<TemperatureUnit>,

        /// Print the raw snapshot as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure => configure(),
            Command::Dashboard => {
                let store = build_store()?;
                dashboard::run(store).await
            }
            Command::Show { location, unit, json } => {
                let store = build_store()?;
                if unit.is_some_and(|u| u != store.state().temperature_unit) {
                    store.toggle_temperature_unit();
                }

                store.fetch_weather(location.as_deref()).await;
                let state = store.state();

                if let Some(message) = &state.error {
                    match render::configure_hint(store.is_configured()) {
                        Some(hint) => bail!("{message}\n{hint}"),
                        None => bail!("{message}"),
                    }
                }

                if json {
                    let snapshot = state.snapshot.as_ref().context("No weather data returned")?;
                    println!("{}", serde_json::to_string_pretty(snapshot)?);
                } else {
                    println!("{}", render::content(&state));
                }
                Ok(())
            }
        }
    }
}

fn build_store() -> anyhow::Result<WeatherStore> {
    let config = Config::load_with_env()?;
    let store = WeatherStore::from_config(&config)?;
    Ok(store)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key.trim().to_string());

    let units = vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let start = units.iter().position(|u| *u == config.default_unit).unwrap_or(0);
    config.default_unit = Select::new("Default temperature unit:", units)
        .with_starting_cursor(start)
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
