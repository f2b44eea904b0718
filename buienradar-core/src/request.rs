//! Request execution against the two fixed Buienradar endpoints.
//!
//! The HTTP client itself sits behind [`Transport`] (blocking) and
//! [`AsyncTransport`]; both are implemented for the matching `reqwest` client.
//! Whatever the transport, the response goes through
//! [`RawResponse::into_payload`], which rejects non-2xx statuses and picks the
//! JSON or text path from the response content type.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const FEED_URL: &str = "https://data.buienradar.nl/2.0/feed/json";
pub const RAIN_URL: &str = "https://gpsgadget.buienradar.nl/data/raintext";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    /// The JSON feed with forecasts and station measurements.
    Feed,
    /// The rain forecast for one coordinate. Coordinates are passed through as-is.
    RainText { latitude: f64, longitude: f64 },
}

impl Endpoint {
    pub fn url(&self) -> &'static str {
        match self {
            Endpoint::Feed => FEED_URL,
            Endpoint::RainText { .. } => RAIN_URL,
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Feed => Vec::new(),
            Endpoint::RainText {
                latitude,
                longitude,
            } => vec![("lat", latitude.to_string()), ("lon", longitude.to_string())],
        }
    }

    pub fn request(&self) -> Request {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Request {
            url: self.url(),
            headers,
            query: self.query(),
        }
    }
}

/// One GET request, as handed to a transport.
#[derive(Debug, Clone)]
pub struct Request {
    pub url: &'static str,
    pub headers: HeaderMap,
    pub query: Vec<(&'static str, String)>,
}

/// What a transport brings back, before any status or format checks.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Final URL including the query string.
    pub url: String,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// A successful response body, already routed by content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Text,
}

impl RawResponse {
    /// Fail on non-2xx, otherwise parse the body according to its content type.
    pub fn into_payload(self) -> Result<Payload> {
        if !self.status.is_success() {
            warn!(url = %self.url, status = %self.status, "request failed");
            return Err(Error::RequestFailed {
                status: self.status,
                url: self.url,
                body: truncate_body(&self.body),
            });
        }

        let content_type = self.content_type.as_deref().unwrap_or_default();
        match format_of(content_type) {
            Some(Format::Json) => serde_json::from_str(&self.body)
                .map(Payload::Json)
                .map_err(|err| Error::decode("JSON document", err.to_string())),
            Some(Format::Text) => Ok(Payload::Text(self.body)),
            None => Err(Error::UnsupportedContentType(content_type.to_string())),
        }
    }
}

fn format_of(content_type: &str) -> Option<Format> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        Some(Format::Json)
    } else if essence == "text/plain" {
        Some(Format::Text)
    } else {
        None
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Blocking `fetch(url, headers, query)`.
pub trait Transport {
    fn fetch(&self, request: &Request) -> Result<RawResponse>;
}

/// Non-blocking `fetch(url, headers, query)`.
///
/// Dropping the returned future must abandon the request.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, request: &Request) -> Result<RawResponse> {
        (**self).fetch(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn fetch(&self, request: &Request) -> Result<RawResponse> {
        (**self).fetch(request)
    }
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for &T {
    async fn fetch(&self, request: &Request) -> Result<RawResponse> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Arc<T> {
    async fn fetch(&self, request: &Request) -> Result<RawResponse> {
        (**self).fetch(request).await
    }
}

impl Transport for reqwest::blocking::Client {
    fn fetch(&self, request: &Request) -> Result<RawResponse> {
        let res = self
            .get(request.url)
            .headers(request.headers.clone())
            .query(&request.query)
            .send()?;

        let status = res.status();
        let url = res.url().to_string();
        let content_type = content_type(res.headers());
        let body = res.text()?;

        Ok(RawResponse {
            url,
            status,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl AsyncTransport for reqwest::Client {
    async fn fetch(&self, request: &Request) -> Result<RawResponse> {
        let res = self
            .get(request.url)
            .headers(request.headers.clone())
            .query(&request.query)
            .send()
            .await?;

        let status = res.status();
        let url = res.url().to_string();
        let content_type = content_type(res.headers());
        let body = res.text().await?;

        Ok(RawResponse {
            url,
            status,
            content_type,
            body,
        })
    }
}

/// Run one blocking round trip.
pub fn execute<T: Transport + ?Sized>(transport: &T, endpoint: &Endpoint) -> Result<Payload> {
    let request = endpoint.request();
    debug!(url = request.url, query = ?request.query, "GET");
    let response = transport.fetch(&request)?;
    debug!(url = %response.url, status = %response.status, "response");
    response.into_payload()
}

/// Run one round trip, suspending at the network boundary.
pub async fn execute_async<T: AsyncTransport + ?Sized>(
    transport: &T,
    endpoint: &Endpoint,
) -> Result<Payload> {
    let request = endpoint.request();
    debug!(url = request.url, query = ?request.query, "GET");
    let response = transport.fetch(&request).await?;
    debug!(url = %response.url, status = %response.status, "response");
    response.into_payload()
}
