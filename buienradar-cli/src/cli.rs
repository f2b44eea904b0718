use anyhow::{Context, anyhow};
use buienradar_core::{AsyncBuienradarClient, Config};
use clap::{ArgAction, Parser, Subcommand};
use inquire::CustomType;
use serde::Serialize;
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "buienradar", version, about = "Dutch weather from the Buienradar feed")]
pub struct Cli {
    /// Print the decoded data as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log more (-v for debug, -vv for trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a default location and the HTTP timeout.
    Configure,

    /// Outlook for the coming days.
    ShortTerm,

    /// Outlook for the days after that.
    LongTerm,

    /// The editorial weather report.
    Report,

    /// Five-day forecast.
    Forecast,

    /// Current station measurements.
    Actual {
        /// Only show this station id.
        #[arg(long)]
        station: Option<u32>,
    },

    /// Rain forecast for the next two hours.
    Rain {
        /// Latitude; defaults to the configured location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; defaults to the configured location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        debug!(?config, "loaded configuration");

        match self.command {
            Command::Configure => configure(&mut config),
            Command::ShortTerm => {
                let message = client(&config)?.get_shortterm_forecast().await?;
                emit(self.json, &message, render::message)
            }
            Command::LongTerm => {
                let message = client(&config)?.get_longterm_forecast().await?;
                emit(self.json, &message, render::message)
            }
            Command::Report => {
                let report = client(&config)?.get_weather_report().await?;
                emit(self.json, &report, render::report)
            }
            Command::Forecast => {
                let days = client(&config)?.get_forecast().await?;
                emit(self.json, &days, |days| render::forecast(days))
            }
            Command::Actual { station: None } => {
                let actual = client(&config)?.get_actual_weather().await?;
                emit(self.json, &actual, render::actual)
            }
            Command::Actual {
                station: Some(id),
            } => {
                let actual = client(&config)?.get_actual_weather().await?;
                let station = actual
                    .station(id)
                    .ok_or_else(|| anyhow!("Station {id} is not in the feed"))?;
                emit(self.json, station, render::station)
            }
            Command::Rain { lat, lon } => {
                let (latitude, longitude) = match (lat, lon) {
                    (Some(lat), Some(lon)) => (lat, lon),
                    _ => {
                        let location = config.location()?;
                        (location.latitude, location.longitude)
                    }
                };
                let rain = client(&config)?.get_rain(latitude, longitude).await?;
                emit(self.json, &rain, |rain| render::rain(rain))
            }
        }
    }
}

fn client(config: &Config) -> anyhow::Result<AsyncBuienradarClient> {
    AsyncBuienradarClient::from_settings(&config.client_settings())
        .context("Failed to set up HTTP client")
}

fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    human: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{text}");
    } else {
        print!("{}", human(value));
    }
    Ok(())
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let current = config.location;

    let mut latitude = CustomType::<f64>::new("Latitude:")
        .with_error_message("Please enter a decimal number, e.g. 52.1")
        .with_help_message("Used by `buienradar rain` when --lat/--lon are omitted");
    if let Some(location) = current {
        latitude = latitude.with_default(location.latitude);
    }
    let latitude = latitude.prompt()?;

    let mut longitude = CustomType::<f64>::new("Longitude:")
        .with_error_message("Please enter a decimal number, e.g. 5.18");
    if let Some(location) = current {
        longitude = longitude.with_default(location.longitude);
    }
    let longitude = longitude.prompt()?;

    let timeout = CustomType::<u64>::new("HTTP timeout in seconds:")
        .with_default(config.timeout_secs.unwrap_or(0))
        .with_help_message("0 disables the timeout")
        .prompt()?;

    config.set_location(latitude, longitude);
    config.timeout_secs = (timeout > 0).then_some(timeout);
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
