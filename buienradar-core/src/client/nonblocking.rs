use crate::client::{
    ACTUAL, ClientSettings, FIVE_DAY_FORECAST, LONG_TERM, SHORT_TERM, WEATHER_REPORT, document,
    rain, section, section_list,
};
use crate::error::Result;
use crate::model::{ActualWeather, Feed, ForecastDay, ForecastMessage, RainData, WeatherReport};
use crate::request::{AsyncTransport, Endpoint, Payload, execute_async};

/// Async client: every call suspends at the network boundary.
///
/// The client owns its transport (by default a `reqwest::Client` and its
/// connection pool); dropping the client releases it, whichever way the scope
/// is left. Dropping an in-flight call's future cancels the request.
#[derive(Debug, Clone)]
pub struct AsyncBuienradarClient<T = reqwest::Client> {
    transport: T,
}

impl AsyncBuienradarClient {
    pub fn new() -> Result<Self> {
        Self::from_settings(&ClientSettings::default())
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .gzip(true)
            .user_agent(settings.user_agent.as_str());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_transport(builder.build()?))
    }
}

impl<T: AsyncTransport> AsyncBuienradarClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    async fn execute(&self, endpoint: Endpoint) -> Result<Payload> {
        execute_async(&self.transport, &endpoint).await
    }

    /// Forecast message for the upcoming 5 days.
    pub async fn get_shortterm_forecast(&self) -> Result<ForecastMessage> {
        section(&self.execute(Endpoint::Feed).await?, SHORT_TERM)
    }

    /// Forecast message for the days after the short term.
    pub async fn get_longterm_forecast(&self) -> Result<ForecastMessage> {
        section(&self.execute(Endpoint::Feed).await?, LONG_TERM)
    }

    /// Forecast data for the upcoming 5 days.
    pub async fn get_forecast(&self) -> Result<Vec<ForecastDay>> {
        section_list(&self.execute(Endpoint::Feed).await?, FIVE_DAY_FORECAST)
    }

    pub async fn get_weather_report(&self) -> Result<WeatherReport> {
        section(&self.execute(Endpoint::Feed).await?, WEATHER_REPORT)
    }

    /// Current measurements of every station.
    pub async fn get_actual_weather(&self) -> Result<ActualWeather> {
        section(&self.execute(Endpoint::Feed).await?, ACTUAL)
    }

    /// Everything in the feed from a single request.
    pub async fn get_feed(&self) -> Result<Feed> {
        document(&self.execute(Endpoint::Feed).await?)
    }

    /// Expected rainfall for the next 2 hours, per 5 minutes.
    pub async fn get_rain(&self, latitude: f64, longitude: f64) -> Result<Vec<RainData>> {
        let endpoint = Endpoint::RainText {
            latitude,
            longitude,
        };
        rain(&self.execute(endpoint).await?)
    }
}
