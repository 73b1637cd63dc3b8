//! Core data models for Vietsky
//!
//! This module contains the data types shared across the application:
//! the supported cities, the raw hourly observation series from the
//! time-series provider, and the date-keyed point readings from the
//! daily point provider.

pub mod city;
pub mod nasa_power;
pub mod open_meteo;

pub use city::{all_cities, get_city_by_id};
pub use nasa_power::{PowerClient, PowerError};
pub use open_meteo::{ForecastError, OpenMeteoClient};

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// A supported city with its geographic coordinates
///
/// Uses `&'static str` for string fields to allow static initialization
/// of the CITIES array.
#[derive(Debug, Clone, Copy)]
pub struct City {
    /// Unique identifier for the city
    pub id: &'static str,
    /// Human-readable name of the city
    pub name: &'static str,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

/// Raw hourly observation series from the time-series provider
///
/// All metric vectors are aligned to `times`: position `i` in any metric
/// refers to the hour `times[i]`. A metric vector may be shorter than
/// `times` or carry `None` entries; both mean "no sample for that hour",
/// which is distinct from a sample of zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    /// Hourly timestamps, provider-local time
    pub times: Vec<NaiveDateTime>,
    /// Air temperature in °C
    pub temperature: Vec<Option<f64>>,
    /// Relative humidity in %
    pub humidity: Vec<Option<f64>>,
    /// Wind speed in km/h
    pub wind_speed: Vec<Option<f64>>,
    /// Precipitation probability in %
    pub rain_probability: Vec<Option<f64>>,
    /// Cloud cover in %
    pub cloud_cover: Vec<Option<f64>>,
    /// Visibility in meters
    pub visibility: Vec<Option<f64>>,
    /// Precipitation in mm
    pub precipitation: Vec<Option<f64>>,
    /// UV index
    pub uv_index: Vec<Option<f64>>,
}

/// Daily point readings from the point provider, keyed by `YYYYMMDD` date
///
/// Each metric maps date keys to a value, or `None` where the provider
/// reported its fill value. The "current" value of a metric is the first
/// value in ascending date-key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointReading {
    /// Daily mean temperature in °C (T2M)
    pub temperature: BTreeMap<String, Option<f64>>,
    /// Daily minimum temperature in °C (T2M_MIN)
    pub temperature_min: BTreeMap<String, Option<f64>>,
    /// Daily maximum temperature in °C (T2M_MAX)
    pub temperature_max: BTreeMap<String, Option<f64>>,
    /// Daily mean relative humidity in % (RH2M)
    pub humidity: BTreeMap<String, Option<f64>>,
    /// Daily mean wind speed in m/s (WS2M)
    pub wind_speed: BTreeMap<String, Option<f64>>,
}

impl PointReading {
    /// Current temperature in °C.
    ///
    /// When both the minimum and maximum temperature are reported for the
    /// first day, their midpoint is used; otherwise the daily mean (T2M).
    /// The midpoint preference applies to every reading, rolling-window
    /// and single-date alike, whenever the provider returned min/max.
    pub fn current_temperature(&self) -> Option<f64> {
        match (
            first_value(&self.temperature_min),
            first_value(&self.temperature_max),
        ) {
            (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
            _ => first_value(&self.temperature),
        }
    }

    /// Current relative humidity in %.
    pub fn current_humidity(&self) -> Option<f64> {
        first_value(&self.humidity)
    }

    /// Current wind speed in m/s, as reported by the provider.
    pub fn current_wind_speed_mps(&self) -> Option<f64> {
        first_value(&self.wind_speed)
    }
}

/// Returns the first value of a date-keyed metric in ascending key order.
fn first_value(metric: &BTreeMap<String, Option<f64>>) -> Option<f64> {
    metric.values().next().copied().flatten()
}
