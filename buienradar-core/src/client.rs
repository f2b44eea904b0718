//! Client facades.
//!
//! [`BuienradarClient`] blocks the calling thread, [`AsyncBuienradarClient`]
//! suspends the calling task. Both run the same request and decode steps
//! defined here; only the way the round trip is awaited differs.

use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use crate::decode::{Decode, decode_many, decode_one, decode_rain_text, select};
use crate::error::{Error, Result};
use crate::model::RainData;
use crate::request::Payload;

pub mod blocking;
pub mod nonblocking;

pub use blocking::BuienradarClient;
pub use nonblocking::AsyncBuienradarClient;

pub(crate) const SHORT_TERM: &str = "forecast.shortterm";
pub(crate) const LONG_TERM: &str = "forecast.longterm";
pub(crate) const FIVE_DAY_FORECAST: &str = "forecast.fivedayforecast";
pub(crate) const WEATHER_REPORT: &str = "forecast.weatherreport";
pub(crate) const ACTUAL: &str = "actual";

pub const DEFAULT_USER_AGENT: &str = concat!("buienradar-core/", env!("CARGO_PKG_VERSION"));

/// Settings handed to the underlying HTTP client.
///
/// The facades never time out on their own; `timeout` is the only bound on a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

fn json<'a>(payload: &'a Payload, shape: &'static str) -> Result<&'a Value> {
    match payload {
        Payload::Json(value) => Ok(value),
        Payload::Text(_) => Err(Error::decode(
            shape,
            "expected a JSON payload, got plain text",
        )),
    }
}

fn logged<T>(result: Result<T>) -> Result<T> {
    result.inspect_err(|err| {
        if err.is_decode() {
            warn!(error = %err, "decode failed");
        }
    })
}

/// Decode one entity found at `path` in the feed.
pub(crate) fn section<T: Decode>(payload: &Payload, path: &str) -> Result<T> {
    logged(
        json(payload, T::SHAPE)
            .and_then(|root| select(root, path, T::SHAPE))
            .and_then(decode_one),
    )
}

/// Decode the array found at `path` in the feed.
pub(crate) fn section_list<T: Decode>(payload: &Payload, path: &str) -> Result<Vec<T>> {
    logged(
        json(payload, T::SHAPE)
            .and_then(|root| select(root, path, T::SHAPE))
            .and_then(decode_many),
    )
}

/// Decode the whole payload as one entity.
pub(crate) fn document<T: Decode>(payload: &Payload) -> Result<T> {
    logged(json(payload, T::SHAPE).and_then(decode_one))
}

pub(crate) fn rain(payload: &Payload) -> Result<Vec<RainData>> {
    logged(match payload {
        Payload::Text(text) => decode_rain_text(text),
        Payload::Json(_) => Err(Error::decode(
            "RainData",
            "expected a plain-text payload, got JSON",
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ForecastDay, ForecastMessage, WeatherReport};
    use serde_json::json;

    #[test]
    fn text_payload_is_rejected_for_feed_sections() {
        let payload = Payload::Text("077|14:05".into());

        let err = section::<ForecastMessage>(&payload, SHORT_TERM).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to decode ForecastMessage: expected a JSON payload, got plain text"
        );
    }

    #[test]
    fn json_payload_is_rejected_for_rain() {
        let err = rain(&Payload::Json(json!([]))).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn missing_section_names_path() {
        let payload = Payload::Json(json!({ "forecast": { "shortterm": {} } }));

        let err = section::<WeatherReport>(&payload, WEATHER_REPORT).unwrap_err();
        assert!(err.to_string().contains("forecast.weatherreport"), "{err}");

        let err = section_list::<ForecastDay>(&payload, FIVE_DAY_FORECAST).unwrap_err();
        assert!(err.to_string().contains("forecast.fivedayforecast"), "{err}");
    }

    #[test]
    fn default_settings_have_no_timeout() {
        let settings = ClientSettings::default();
        assert_eq!(settings.timeout, None);
        assert!(settings.user_agent.starts_with("buienradar-core/"));
    }
}
