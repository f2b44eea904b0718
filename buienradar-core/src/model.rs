//! Domain entities returned by the client.
//!
//! Every entity is built fresh from one response and never mutated afterwards.
//! Feed timestamps carry no offset (they are Dutch local time), so they are
//! kept as [`NaiveDateTime`].

use chrono::NaiveDateTime;
use serde::Serialize;

/// Date-ranged textual outlook, used for both the short- and long-term variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMessage {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub forecast: String,
}

/// One calendar day of the five-day forecast.
///
/// `min_temperature` and `max_temperature` are the feed's display strings and
/// may hold a range such as `"17/18"`; the numeric bounds are passed through
/// without checking that min <= max.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub day: NaiveDateTime,
    pub min_temperature: String,
    pub max_temperature: String,
    pub min_temperature_min: i32,
    pub min_temperature_max: i32,
    pub max_temperature_min: i32,
    pub max_temperature_max: i32,
    /// Percentage, 0-100.
    pub rain_chance: u8,
    /// Percentage, 0-100.
    pub sun_chance: u8,
    pub wind_direction: String,
    /// Beaufort force.
    pub wind: u8,
    pub mm_rain_min: f64,
    pub mm_rain_max: f64,
    pub weather_description: String,
    pub icon_url: String,
}

/// Editorial weather report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub published: NaiveDateTime,
    pub title: String,
    pub summary: String,
    pub text: String,
    pub author: String,
    pub author_bio: String,
}

/// Latest reading of a single weather station.
///
/// Sensor fields are `None` when the station does not report them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMeasurement {
    pub station_id: u32,
    pub station_name: String,
    pub lat: f64,
    pub lon: f64,
    pub region: String,
    pub timestamp: NaiveDateTime,
    pub weather_description: String,
    pub icon_url: String,
    pub graph_url: String,
    /// Degrees Celsius, 1.5 m above ground.
    pub temperature: Option<f64>,
    /// Degrees Celsius, 10 cm above ground.
    pub ground_temperature: Option<f64>,
    pub feel_temperature: Option<f64>,
    /// Relative humidity, percent.
    pub humidity: Option<f64>,
    pub wind_direction: Option<String>,
    /// m/s.
    pub wind_gusts: Option<f64>,
    /// m/s.
    pub wind_speed: Option<f64>,
    pub wind_speed_bft: Option<u8>,
    /// mm/h.
    pub precipitation: Option<f64>,
    /// W/m².
    pub sun_power: Option<f64>,
    /// mm.
    pub rain_last_24h: Option<f64>,
    /// mm.
    pub rain_last_hour: Option<f64>,
    pub wind_direction_degrees: Option<u16>,
    /// hPa.
    pub air_pressure: Option<f64>,
}

/// Current conditions: radar image, sun times and every station's reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActualWeather {
    pub radar_image_url: String,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
    pub station_measurements: Vec<StationMeasurement>,
}

impl ActualWeather {
    pub fn station(&self, station_id: u32) -> Option<&StationMeasurement> {
        self.station_measurements
            .iter()
            .find(|m| m.station_id == station_id)
    }

    /// Case-insensitive lookup; matches with or without the `Meetstation ` prefix.
    pub fn station_by_name(&self, name: &str) -> Option<&StationMeasurement> {
        let wanted = name.trim().to_lowercase();
        self.station_measurements.iter().find(|m| {
            let full = m.station_name.to_lowercase();
            full == wanted || full.strip_prefix("meetstation ") == Some(wanted.as_str())
        })
    }
}

/// Every forecast section of the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub weather_report: WeatherReport,
    pub short_term: ForecastMessage,
    pub long_term: ForecastMessage,
    pub five_day_forecast: Vec<ForecastDay>,
}

/// The whole JSON feed, decoded in one go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed {
    pub actual: ActualWeather,
    pub forecast: Forecast,
}

/// One five-minute sample of the rain forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RainData {
    /// Clock label as sent by the feed (e.g. `"14:05"`), not interpreted.
    pub time_label: String,
    /// Logarithmic intensity code, `None` when the feed marks the slot as "no data".
    pub intensity_code: Option<u8>,
}

impl RainData {
    pub fn new(intensity_code: u8, time_label: impl Into<String>) -> Self {
        Self {
            time_label: time_label.into(),
            intensity_code: Some(intensity_code),
        }
    }

    pub fn no_data(time_label: impl Into<String>) -> Self {
        Self {
            time_label: time_label.into(),
            intensity_code: None,
        }
    }

    /// Rain intensity in mm/h: `10^((code - 109) / 32)`, with code 0 meaning dry.
    pub fn rain_intensity(&self) -> Option<f64> {
        self.intensity_code.map(intensity_from_code)
    }

    pub fn is_dry(&self) -> bool {
        self.rain_intensity().is_none_or(|mm| mm == 0.0)
    }
}

fn intensity_from_code(code: u8) -> f64 {
    if code == 0 {
        return 0.0;
    }
    10f64.powf((f64::from(code) - 109.0) / 32.0)
}
