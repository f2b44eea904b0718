use std::future::pending;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use buienradar_core::request::{FEED_URL, RAIN_URL};
use buienradar_core::{
    AsyncBuienradarClient, AsyncTransport, BuienradarClient, Error, RawResponse, Request,
    Transport,
};
use reqwest::StatusCode;
use serde_json::Value;

const FEED: &str = include_str!("fixtures/feed.json");
const RAIN: &str = include_str!("fixtures/raintext.txt");

/// Answers every request with the same canned response and records what was asked.
#[derive(Debug)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    requests: Mutex<Vec<Request>>,
}

impl Canned {
    fn new(status: StatusCode, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn feed() -> Self {
        Self::new(StatusCode::OK, "application/json; charset=utf-8", FEED)
    }

    fn rain() -> Self {
        Self::new(StatusCode::OK, "text/plain", RAIN)
    }

    fn answer(&self, request: &Request) -> RawResponse {
        self.requests.lock().unwrap().push(request.clone());
        RawResponse {
            url: request.url.to_string(),
            status: self.status,
            content_type: Some(self.content_type.to_string()),
            body: self.body.clone(),
        }
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for Canned {
    fn fetch(&self, request: &Request) -> buienradar_core::Result<RawResponse> {
        Ok(self.answer(request))
    }
}

#[async_trait]
impl AsyncTransport for Canned {
    async fn fetch(&self, request: &Request) -> buienradar_core::Result<RawResponse> {
        Ok(self.answer(request))
    }
}

fn feed_with(edit: impl FnOnce(&mut Value)) -> String {
    let mut feed: Value = serde_json::from_str(FEED).unwrap();
    edit(&mut feed);
    feed.to_string()
}

#[test]
fn actual_weather_has_both_stations() {
    let client = BuienradarClient::with_transport(Canned::feed());

    let weather = client.get_actual_weather().unwrap();

    assert_eq!(weather.station_measurements.len(), 2);
    assert_eq!(
        weather.radar_image_url,
        "https://api.buienradar.nl/image/1.0/RadarMapNL?w=500&h=512"
    );
    assert_eq!(weather.sunrise.to_string(), "2019-09-25 07:30:00");
    assert_eq!(weather.station_measurements[0].station_name, "Meetstation Arcen");
    assert_eq!(weather.station_measurements[1].temperature, None);
}

#[test]
fn five_day_forecast_has_five_days() {
    let client = BuienradarClient::with_transport(Canned::feed());

    let forecast = client.get_forecast().unwrap();

    assert_eq!(forecast.len(), 5);
    assert_eq!(forecast[3].min_temperature, "12/13");
    assert_eq!(forecast[3].mm_rain_max, 17.0);
}

#[test]
fn messages_and_report_come_from_their_sections() {
    let client = BuienradarClient::with_transport(Canned::feed());

    let short = client.get_shortterm_forecast().unwrap();
    let long = client.get_longterm_forecast().unwrap();
    let report = client.get_weather_report().unwrap();

    assert_eq!(short.start_date.to_string(), "2019-09-26 00:00:00");
    assert_eq!(long.start_date.to_string(), "2019-10-01 00:00:00");
    assert_eq!(report.title, "Kletsnat");
    assert!(report.author_bio.starts_with("Sinds 2014"));
}

#[test]
fn each_call_is_one_feed_request() {
    let transport = Arc::new(Canned::feed());
    let client = BuienradarClient::with_transport(Arc::clone(&transport));

    client.get_forecast().unwrap();
    client.get_feed().unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.url, FEED_URL);
        assert!(request.query.is_empty());
        assert_eq!(request.headers["accept"], "application/json");
    }
}

#[test]
fn rain_is_decoded_from_text() {
    let transport = Arc::new(Canned::rain());
    let client = BuienradarClient::with_transport(Arc::clone(&transport));

    let rain = client.get_rain(52.1, 5.18).unwrap();

    assert_eq!(rain.len(), 5);
    assert_eq!(rain[2].time_label, "14:15");
    let mm = rain[2].rain_intensity().unwrap();
    assert!((mm - 0.1).abs() < 1e-9, "got {mm}");
    assert!(rain[0].is_dry());

    let request = &transport.requests()[0];
    assert_eq!(request.url, RAIN_URL);
    assert_eq!(
        request.query,
        vec![("lat", "52.1".to_string()), ("lon", "5.18".to_string())]
    );
}

#[test]
fn server_error_skips_decoding() {
    // Body is not valid JSON: reaching the decoder would yield a decode error instead.
    let client = BuienradarClient::with_transport(Canned::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "application/json",
        "{ oops",
    ));

    let err = client.get_actual_weather().unwrap_err();
    match err {
        Error::RequestFailed { status, url, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(url, FEED_URL);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = client.get_forecast().unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[test]
fn client_error_on_rain_endpoint() {
    let client = BuienradarClient::with_transport(Canned::new(
        StatusCode::BAD_REQUEST,
        "text/plain",
        "no|good",
    ));

    let err = client.get_rain(0.0, 0.0).unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert!(!err.is_decode());
}

#[test]
fn broken_forecast_day_fails_whole_call() {
    let body = feed_with(|feed| {
        feed["forecast"]["fivedayforecast"][4]
            .as_object_mut()
            .unwrap()
            .remove("rainChance");
    });
    let client = BuienradarClient::with_transport(Canned::new(
        StatusCode::OK,
        "application/json",
        body,
    ));

    let err = client.get_forecast().unwrap_err();
    match err {
        Error::DecodeFailed { shape, reason } => {
            assert_eq!(shape, "ForecastDay");
            assert!(reason.contains("rainChance"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn broken_station_fails_actual_weather() {
    let body = feed_with(|feed| {
        feed["actual"]["stationmeasurements"][0]
            .as_object_mut()
            .unwrap()
            .remove("stationname");
    });
    let client = BuienradarClient::with_transport(Canned::new(
        StatusCode::OK,
        "application/json",
        body,
    ));

    let err = client.get_actual_weather().unwrap_err();
    assert!(err.is_decode());
    assert!(err.to_string().contains("StationMeasurement"), "{err}");
}

#[test]
fn rain_line_without_delimiter_fails() {
    let client = BuienradarClient::with_transport(Canned::new(
        StatusCode::OK,
        "text/plain",
        "077|14:05\n08014:10\n",
    ));

    let err = client.get_rain(52.1, 5.18).unwrap_err();
    assert!(err.is_decode());
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn unexpected_content_type_is_an_error() {
    let client = BuienradarClient::with_transport(Canned::new(
        StatusCode::OK,
        "text/html",
        "<html/>",
    ));

    let err = client.get_feed().unwrap_err();
    assert!(matches!(err, Error::UnsupportedContentType(_)));
}

#[tokio::test]
async fn async_client_matches_blocking_client() {
    let blocking = BuienradarClient::with_transport(Canned::feed());
    let client = AsyncBuienradarClient::with_transport(Canned::feed());

    assert_eq!(
        client.get_feed().await.unwrap(),
        blocking.get_feed().unwrap()
    );
    assert_eq!(
        client.get_forecast().await.unwrap(),
        blocking.get_forecast().unwrap()
    );
    assert_eq!(
        client.get_actual_weather().await.unwrap(),
        blocking.get_actual_weather().unwrap()
    );
    assert_eq!(
        client.get_weather_report().await.unwrap(),
        blocking.get_weather_report().unwrap()
    );
    assert_eq!(
        client.get_shortterm_forecast().await.unwrap(),
        blocking.get_shortterm_forecast().unwrap()
    );
    assert_eq!(
        client.get_longterm_forecast().await.unwrap(),
        blocking.get_longterm_forecast().unwrap()
    );
}

#[tokio::test]
async fn async_calls_run_concurrently_on_one_client() {
    let client = AsyncBuienradarClient::with_transport(Canned::feed());

    let (forecast, actual, report) = tokio::join!(
        client.get_forecast(),
        client.get_actual_weather(),
        client.get_weather_report()
    );

    assert_eq!(forecast.unwrap().len(), 5);
    assert_eq!(actual.unwrap().station_measurements.len(), 2);
    assert_eq!(report.unwrap().author, "Nicolien Kroon");
}

#[tokio::test]
async fn async_client_can_borrow_its_transport() {
    let transport = Canned::rain();
    let client = AsyncBuienradarClient::with_transport(&transport);

    let rain = client.get_rain(52.1, 5.18).await.unwrap();

    assert_eq!(rain.len(), 5);
    assert_eq!(transport.requests()[0].url, RAIN_URL);
}

#[tokio::test]
async fn async_rain_and_errors() {
    let client = AsyncBuienradarClient::with_transport(Canned::rain());
    let rain = client.get_rain(52.1, 5.18).await.unwrap();
    assert_eq!(rain.len(), 5);

    let client = AsyncBuienradarClient::with_transport(Canned::new(
        StatusCode::SERVICE_UNAVAILABLE,
        "text/plain",
        "",
    ));
    let err = client.get_rain(52.1, 5.18).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));

    // Text where JSON is expected.
    let client = AsyncBuienradarClient::with_transport(Canned::rain());
    let err = client.get_forecast().await.unwrap_err();
    assert!(err.is_decode());
}

/// Never answers; flags when the in-flight request is dropped.
#[derive(Debug, Default)]
struct Hanging {
    dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AsyncTransport for Hanging {
    async fn fetch(&self, _request: &Request) -> buienradar_core::Result<RawResponse> {
        let _flag = DropFlag(Arc::clone(&self.dropped));
        pending().await
    }
}

#[tokio::test]
async fn dropping_the_call_cancels_the_request() {
    let transport = Hanging::default();
    let dropped = Arc::clone(&transport.dropped);
    let client = AsyncBuienradarClient::with_transport(transport);

    let outcome = tokio::time::timeout(Duration::from_millis(20), client.get_forecast()).await;

    assert!(outcome.is_err(), "call must still be pending");
    assert!(dropped.load(Ordering::SeqCst));
}
