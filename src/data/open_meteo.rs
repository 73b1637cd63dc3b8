//! Open-Meteo forecast API client
//!
//! This module fetches dense hourly forecast arrays from the Open-Meteo API
//! and parses them into the shared [`HourlySeries`] contract. Hourly arrays
//! may contain JSON `null` entries or be shorter than the timestamp index;
//! both are preserved as missing values rather than zeros.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::HourlySeries;

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly metrics requested from the API, aligned to a shared time index
const HOURLY_PARAMS: &str = "precipitation,precipitation_probability,temperature_2m,\
cloud_cover,visibility,wind_speed_10m,relative_humidity_2m,uv_index";

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Client for fetching hourly forecast data from Open-Meteo
#[derive(Debug, Clone, Default)]
pub struct OpenMeteoClient {
    client: Client,
}

impl OpenMeteoClient {
    /// Create a new OpenMeteoClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new OpenMeteoClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the hourly forecast series for the given coordinates
    ///
    /// The provider resolves the timezone (`timezone=auto`), so timestamps
    /// are local to the requested location.
    pub async fn fetch_hourly(&self, lat: f64, lon: f64) -> Result<HourlySeries, ForecastError> {
        let url = format!(
            "{OPEN_METEO_BASE_URL}?latitude={lat}&longitude={lon}&hourly={HOURLY_PARAMS}&timezone=auto"
        );
        self.fetch(&url).await
    }

    /// Fetch the hourly series restricted to a single calendar date
    pub async fn fetch_hourly_for_date(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
    ) -> Result<HourlySeries, ForecastError> {
        let day = date.format("%Y-%m-%d");
        let url = format!(
            "{OPEN_METEO_BASE_URL}?latitude={lat}&longitude={lon}&hourly={HOURLY_PARAMS}&timezone=auto&start_date={day}&end_date={day}"
        );
        self.fetch(&url).await
    }

    async fn fetch(&self, url: &str) -> Result<HourlySeries, ForecastError> {
        let response = self.client.get(url).send().await?;
        let text = response.text().await?;
        let api_response: OpenMeteoResponse = serde_json::from_str(&text)?;
        parse_response(api_response)
    }
}

/// Parse the Open-Meteo API response into an HourlySeries
fn parse_response(response: OpenMeteoResponse) -> Result<HourlySeries, ForecastError> {
    let hourly = response.hourly;

    let times = hourly
        .time
        .iter()
        .map(|t| parse_datetime(t))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HourlySeries {
        times,
        temperature: hourly.temperature_2m,
        humidity: hourly.relative_humidity_2m,
        wind_speed: hourly.wind_speed_10m,
        rain_probability: hourly.precipitation_probability,
        cloud_cover: hourly.cloud_cover,
        visibility: hourly.visibility,
        precipitation: hourly.precipitation,
        uv_index: hourly.uv_index,
    })
}

/// Parse a datetime string in ISO 8601 format (e.g., "2024-07-15T05:30") to NaiveDateTime
fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .map_err(|_| ForecastError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Open-Meteo API response structure
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    hourly: HourlyBlock,
}

/// Hourly data block from Open-Meteo
///
/// Every metric defaults to an empty array so an omitted metric (the API
/// only returns what was requested) parses as "no samples".
#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    cloud_cover: Vec<Option<f64>>,
    #[serde(default)]
    visibility: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    uv_index: Vec<Option<f64>>,
}
