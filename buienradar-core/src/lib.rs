//! Core library for the Buienradar weather feed.
//!
//! This crate defines:
//! - Strongly-typed entities for forecasts, station measurements and rain data
//! - Decoders from the JSON feed and the plain-text rain forecast
//! - Blocking and async clients sharing the same decoding
//! - Configuration handling for the `buienradar` CLI
//!
//! ```no_run
//! # fn main() -> buienradar_core::Result<()> {
//! let client = buienradar_core::BuienradarClient::new()?;
//! for day in client.get_forecast()? {
//!     println!("{}: {}", day.day.date(), day.weather_description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod request;

pub use client::{AsyncBuienradarClient, BuienradarClient, ClientSettings};
pub use config::{Config, Location};
pub use error::{Error, Result};
pub use model::{
    ActualWeather, Feed, Forecast, ForecastDay, ForecastMessage, RainData, StationMeasurement,
    WeatherReport,
};
pub use request::{AsyncTransport, Endpoint, Payload, RawResponse, Request, Transport};
