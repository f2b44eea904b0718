//! Wire layouts of the JSON feed.
//!
//! Each `*Wire` struct is the renaming table of one entity shape: the serde
//! attribute is the key as it appears in the feed, the field name is the model
//! field it lands in. The feed mixes all-lowercase keys (`stationname`) with
//! camelCase ones (`mintemperatureMax`, `graphUrl`). Keys not listed here
//! (such as `$id`) are ignored.

use chrono::NaiveDateTime;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use super::{Decode, decode_many, decode_one, json_kind, select};
use crate::error::{Error, Result};
use crate::model::{
    ActualWeather, Feed, Forecast, ForecastDay, ForecastMessage, StationMeasurement,
    WeatherReport,
};

fn expect_object(shape: &'static str, value: &Value) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(Error::decode(
            shape,
            format!("expected a JSON object, found {}", json_kind(value)),
        ))
    }
}

fn from_object<W: DeserializeOwned>(shape: &'static str, value: &Value) -> Result<W> {
    expect_object(shape, value)?;
    W::deserialize(value).map_err(|err| Error::decode(shape, err.to_string()))
}

#[derive(Debug, Deserialize)]
struct ForecastMessageWire {
    #[serde(rename = "startdate")]
    start_date: NaiveDateTime,
    #[serde(rename = "enddate")]
    end_date: NaiveDateTime,
    forecast: String,
}

impl Decode for ForecastMessage {
    const SHAPE: &'static str = "ForecastMessage";

    fn from_json(value: &Value) -> Result<Self> {
        let wire: ForecastMessageWire = from_object(Self::SHAPE, value)?;
        Ok(ForecastMessage {
            start_date: wire.start_date,
            end_date: wire.end_date,
            forecast: wire.forecast,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ForecastDayWire {
    day: NaiveDateTime,
    #[serde(rename = "mintemperature")]
    min_temperature: String,
    #[serde(rename = "maxtemperature")]
    max_temperature: String,
    #[serde(rename = "mintemperatureMin")]
    min_temperature_min: i32,
    #[serde(rename = "mintemperatureMax")]
    min_temperature_max: i32,
    #[serde(rename = "maxtemperatureMin")]
    max_temperature_min: i32,
    #[serde(rename = "maxtemperatureMax")]
    max_temperature_max: i32,
    #[serde(rename = "rainChance")]
    rain_chance: u8,
    #[serde(rename = "sunChance")]
    sun_chance: u8,
    #[serde(rename = "windDirection")]
    wind_direction: String,
    wind: u8,
    #[serde(rename = "mmRainMin")]
    mm_rain_min: f64,
    #[serde(rename = "mmRainMax")]
    mm_rain_max: f64,
    #[serde(rename = "weatherdescription")]
    weather_description: String,
    #[serde(rename = "iconurl")]
    icon_url: String,
}

impl Decode for ForecastDay {
    const SHAPE: &'static str = "ForecastDay";

    fn from_json(value: &Value) -> Result<Self> {
        let wire: ForecastDayWire = from_object(Self::SHAPE, value)?;
        Ok(ForecastDay {
            day: wire.day,
            min_temperature: wire.min_temperature,
            max_temperature: wire.max_temperature,
            min_temperature_min: wire.min_temperature_min,
            min_temperature_max: wire.min_temperature_max,
            max_temperature_min: wire.max_temperature_min,
            max_temperature_max: wire.max_temperature_max,
            rain_chance: wire.rain_chance,
            sun_chance: wire.sun_chance,
            wind_direction: wire.wind_direction,
            wind: wire.wind,
            mm_rain_min: wire.mm_rain_min,
            mm_rain_max: wire.mm_rain_max,
            weather_description: wire.weather_description,
            icon_url: wire.icon_url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WeatherReportWire {
    published: NaiveDateTime,
    title: String,
    summary: String,
    text: String,
    author: String,
    #[serde(rename = "authorbio")]
    author_bio: String,
}

impl Decode for WeatherReport {
    const SHAPE: &'static str = "WeatherReport";

    fn from_json(value: &Value) -> Result<Self> {
        let wire: WeatherReportWire = from_object(Self::SHAPE, value)?;
        Ok(WeatherReport {
            published: wire.published,
            title: wire.title,
            summary: wire.summary,
            text: wire.text,
            author: wire.author,
            author_bio: wire.author_bio,
        })
    }
}

#[derive(Debug, Deserialize)]
struct StationMeasurementWire {
    #[serde(rename = "stationid")]
    station_id: u32,
    #[serde(rename = "stationname")]
    station_name: String,
    lat: f64,
    lon: f64,
    #[serde(rename = "regio")]
    region: String,
    timestamp: NaiveDateTime,
    #[serde(rename = "weatherdescription")]
    weather_description: String,
    #[serde(rename = "iconurl")]
    icon_url: String,
    #[serde(rename = "graphUrl")]
    graph_url: String,
    temperature: Option<f64>,
    #[serde(rename = "groundtemperature")]
    ground_temperature: Option<f64>,
    #[serde(rename = "feeltemperature")]
    feel_temperature: Option<f64>,
    humidity: Option<f64>,
    #[serde(rename = "winddirection")]
    wind_direction: Option<String>,
    #[serde(rename = "windgusts")]
    wind_gusts: Option<f64>,
    #[serde(rename = "windspeed")]
    wind_speed: Option<f64>,
    #[serde(rename = "windspeedBft")]
    wind_speed_bft: Option<u8>,
    precipitation: Option<f64>,
    #[serde(rename = "sunpower")]
    sun_power: Option<f64>,
    #[serde(rename = "rainFallLast24Hour")]
    rain_last_24h: Option<f64>,
    #[serde(rename = "rainFallLastHour")]
    rain_last_hour: Option<f64>,
    #[serde(rename = "winddirectiondegrees")]
    wind_direction_degrees: Option<u16>,
    #[serde(rename = "airpressure")]
    air_pressure: Option<f64>,
}

impl Decode for StationMeasurement {
    const SHAPE: &'static str = "StationMeasurement";

    fn from_json(value: &Value) -> Result<Self> {
        let wire: StationMeasurementWire = from_object(Self::SHAPE, value)?;
        Ok(StationMeasurement {
            station_id: wire.station_id,
            station_name: wire.station_name,
            lat: wire.lat,
            lon: wire.lon,
            region: wire.region,
            timestamp: wire.timestamp,
            weather_description: wire.weather_description,
            icon_url: wire.icon_url,
            graph_url: wire.graph_url,
            temperature: wire.temperature,
            ground_temperature: wire.ground_temperature,
            feel_temperature: wire.feel_temperature,
            humidity: wire.humidity,
            wind_direction: wire.wind_direction,
            wind_gusts: wire.wind_gusts,
            wind_speed: wire.wind_speed,
            wind_speed_bft: wire.wind_speed_bft,
            precipitation: wire.precipitation,
            sun_power: wire.sun_power,
            rain_last_24h: wire.rain_last_24h,
            rain_last_hour: wire.rain_last_hour,
            wind_direction_degrees: wire.wind_direction_degrees,
            air_pressure: wire.air_pressure,
        })
    }
}

// Station list is decoded separately so element errors name StationMeasurement.
#[derive(Debug, Deserialize)]
struct ActualWeatherWire {
    #[serde(rename = "actualradarurl")]
    radar_image_url: String,
    sunrise: NaiveDateTime,
    sunset: NaiveDateTime,
}

impl Decode for ActualWeather {
    const SHAPE: &'static str = "ActualWeather";

    fn from_json(value: &Value) -> Result<Self> {
        let wire: ActualWeatherWire = from_object(Self::SHAPE, value)?;
        let stations = select(value, "stationmeasurements", Self::SHAPE)?;
        Ok(ActualWeather {
            radar_image_url: wire.radar_image_url,
            sunrise: wire.sunrise,
            sunset: wire.sunset,
            station_measurements: decode_many(stations)?,
        })
    }
}

impl Decode for Forecast {
    const SHAPE: &'static str = "Forecast";

    fn from_json(value: &Value) -> Result<Self> {
        expect_object(Self::SHAPE, value)?;
        Ok(Forecast {
            weather_report: decode_one(select(value, "weatherreport", WeatherReport::SHAPE)?)?,
            short_term: decode_one(select(value, "shortterm", ForecastMessage::SHAPE)?)?,
            long_term: decode_one(select(value, "longterm", ForecastMessage::SHAPE)?)?,
            five_day_forecast: decode_many(select(value, "fivedayforecast", ForecastDay::SHAPE)?)?,
        })
    }
}

impl Decode for Feed {
    const SHAPE: &'static str = "Feed";

    fn from_json(value: &Value) -> Result<Self> {
        expect_object(Self::SHAPE, value)?;
        Ok(Feed {
            actual: decode_one(select(value, "actual", ActualWeather::SHAPE)?)?,
            forecast: decode_one(select(value, "forecast", Forecast::SHAPE)?)?,
        })
    }
}
