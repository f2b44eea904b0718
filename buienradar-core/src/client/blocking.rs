use crate::client::{
    ACTUAL, ClientSettings, FIVE_DAY_FORECAST, LONG_TERM, SHORT_TERM, WEATHER_REPORT, document,
    rain, section, section_list,
};
use crate::error::Result;
use crate::model::{ActualWeather, Feed, ForecastDay, ForecastMessage, RainData, WeatherReport};
use crate::request::{Endpoint, Payload, Transport, execute};

/// Blocking client: every call occupies the calling thread for one round trip.
///
/// The transport (by default a `reqwest::blocking::Client` with its connection
/// pool) lives as long as the client. `reqwest::blocking` must not be used from
/// within an async runtime; use [`crate::AsyncBuienradarClient`] there.
#[derive(Debug, Clone)]
pub struct BuienradarClient<T = reqwest::blocking::Client> {
    transport: T,
}

impl BuienradarClient {
    pub fn new() -> Result<Self> {
        Self::from_settings(&ClientSettings::default())
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        // The blocking builder defaults to a 30s timeout; `None` lifts it.
        let http = reqwest::blocking::Client::builder()
            .gzip(true)
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .build()?;
        Ok(Self::with_transport(http))
    }
}

impl<T: Transport> BuienradarClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    fn execute(&self, endpoint: Endpoint) -> Result<Payload> {
        execute(&self.transport, &endpoint)
    }

    /// Forecast message for the upcoming 5 days.
    pub fn get_shortterm_forecast(&self) -> Result<ForecastMessage> {
        section(&self.execute(Endpoint::Feed)?, SHORT_TERM)
    }

    /// Forecast message for the days after the short term.
    pub fn get_longterm_forecast(&self) -> Result<ForecastMessage> {
        section(&self.execute(Endpoint::Feed)?, LONG_TERM)
    }

    /// Forecast data for the upcoming 5 days.
    pub fn get_forecast(&self) -> Result<Vec<ForecastDay>> {
        section_list(&self.execute(Endpoint::Feed)?, FIVE_DAY_FORECAST)
    }

    pub fn get_weather_report(&self) -> Result<WeatherReport> {
        section(&self.execute(Endpoint::Feed)?, WEATHER_REPORT)
    }

    /// Current measurements of every station.
    pub fn get_actual_weather(&self) -> Result<ActualWeather> {
        section(&self.execute(Endpoint::Feed)?, ACTUAL)
    }

    /// Everything in the feed from a single request.
    pub fn get_feed(&self) -> Result<Feed> {
        document(&self.execute(Endpoint::Feed)?)
    }

    /// Expected rainfall for the next 2 hours, per 5 minutes.
    pub fn get_rain(&self, latitude: f64, longitude: f64) -> Result<Vec<RainData>> {
        rain(&self.execute(Endpoint::RainText {
            latitude,
            longitude,
        })?)
    }
}
