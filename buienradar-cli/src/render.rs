//! Human-readable output.

use std::fmt::Write;

use buienradar_core::{
    ActualWeather, ForecastDay, ForecastMessage, RainData, StationMeasurement, WeatherReport,
};
use chrono::NaiveDateTime;

const DATE: &str = "%a %d %b";
const DATE_TIME: &str = "%a %d %b %H:%M";
const CLOCK: &str = "%H:%M";

fn date(at: NaiveDateTime) -> String {
    at.format(DATE).to_string()
}

fn date_time(at: NaiveDateTime) -> String {
    at.format(DATE_TIME).to_string()
}

fn clock(at: NaiveDateTime) -> String {
    at.format(CLOCK).to_string()
}

pub fn message(message: &ForecastMessage) -> String {
    format!(
        "{} to {}\n{}\n",
        date(message.start_date),
        date(message.end_date),
        message.forecast
    )
}

pub fn report(report: &WeatherReport) -> String {
    format!(
        "{}\n{} ({})\n\n{}\n\n{}\n",
        report.title,
        report.author,
        date_time(report.published),
        report.summary,
        report.text
    )
}

pub fn forecast(days: &[ForecastDay]) -> String {
    let mut out = String::new();
    for day in days {
        let _ = writeln!(
            out,
            "{:<10}  {:>5}..{:<5} °C  rain {:>3}% ({}-{} mm)  sun {:>3}%  wind {} {}  {}",
            date(day.day),
            day.min_temperature,
            day.max_temperature,
            day.rain_chance,
            day.mm_rain_min,
            day.mm_rain_max,
            day.sun_chance,
            day.wind_direction.to_uppercase(),
            day.wind,
            day.weather_description
        );
    }
    out
}

pub fn actual(actual: &ActualWeather) -> String {
    let mut out = format!(
        "Sunrise {}, sunset {}\nRadar: {}\n\n",
        clock(actual.sunrise),
        clock(actual.sunset),
        actual.radar_image_url
    );
    for measurement in &actual.station_measurements {
        out.push_str(&station(measurement));
    }
    out
}

pub fn station(m: &StationMeasurement) -> String {
    format!(
        "{:>5}  {:<32} {:<16} {:>6} °C  wind {} {} Bft  {:>7} hPa  {}\n",
        m.station_id,
        m.station_name,
        m.region,
        optional(m.temperature),
        m.wind_direction.as_deref().unwrap_or("-"),
        m.wind_speed_bft.map_or_else(|| "-".to_string(), |bft| bft.to_string()),
        optional(m.air_pressure),
        m.weather_description
    )
}

pub fn rain(samples: &[RainData]) -> String {
    let mut out = String::new();
    for sample in samples {
        let intensity = match sample.rain_intensity() {
            Some(mm) => format!("{mm:.2} mm/h"),
            None => "no data".to_string(),
        };
        let _ = writeln!(out, "{:>5}  {}", sample.time_label, intensity);
    }
    out
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}
