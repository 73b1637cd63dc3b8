//! NASA POWER daily point API client
//!
//! This module fetches date-keyed daily values from the NASA POWER
//! `temporal/daily/point` endpoint and parses them into a [`PointReading`].
//! The provider marks missing days with a numeric fill value (-999), which
//! is normalized to `None` here so it can never be read as a measurement.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::PointReading;

/// Base URL for the NASA POWER daily point API
const POWER_BASE_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

/// Daily parameters requested from the API
const DAILY_PARAMS: &str = "T2M,T2M_MIN,T2M_MAX,RH2M,WS2M";

/// Values at or below this cutoff are the provider's fill value for "no data"
const FILL_VALUE_CUTOFF: f64 = -900.0;

/// Errors that can occur when fetching point data
#[derive(Debug, Error)]
pub enum PowerError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Response was missing the expected payload structure
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// Client for fetching daily point data from NASA POWER
#[derive(Debug, Clone, Default)]
pub struct PowerClient {
    client: Client,
}

impl PowerClient {
    /// Create a new PowerClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new PowerClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch daily point readings for the given coordinates and date window
    /// (both bounds inclusive)
    pub async fn fetch_daily(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PointReading, PowerError> {
        let start = start.format("%Y%m%d");
        let end = end.format("%Y%m%d");
        let url = format!(
            "{POWER_BASE_URL}?parameters={DAILY_PARAMS}&community=RE&longitude={lon}&latitude={lat}&start={start}&end={end}&format=JSON"
        );

        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;
        let api_response: PowerResponse = serde_json::from_str(&text)?;

        parse_response(api_response)
    }
}

/// Parse the NASA POWER API response into a PointReading
fn parse_response(response: PowerResponse) -> Result<PointReading, PowerError> {
    let mut parameters = response
        .properties
        .and_then(|p| p.parameter)
        .ok_or_else(|| PowerError::MissingField("properties.parameter".to_string()))?;

    let mut take = |name: &str| {
        parameters
            .remove(name)
            .map(normalize_fill_values)
            .unwrap_or_default()
    };

    Ok(PointReading {
        temperature: take("T2M"),
        temperature_min: take("T2M_MIN"),
        temperature_max: take("T2M_MAX"),
        humidity: take("RH2M"),
        wind_speed: take("WS2M"),
    })
}

/// Replaces provider fill values with `None`, keeping date-key order.
fn normalize_fill_values(metric: BTreeMap<String, f64>) -> BTreeMap<String, Option<f64>> {
    metric
        .into_iter()
        .map(|(day, value)| {
            let value = (value > FILL_VALUE_CUTOFF).then_some(value);
            (day, value)
        })
        .collect()
}

/// NASA POWER API response structure
#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: Option<PowerProperties>,
}

/// Properties block holding the per-parameter date maps
#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: Option<BTreeMap<String, BTreeMap<String, f64>>>,
}
