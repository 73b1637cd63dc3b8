//! Unified current-conditions snapshot
//!
//! This module merges today's [`DailyAggregate`] from the time-series
//! source with the latest [`PointReading`] from the point source into one
//! [`WeatherSnapshot`]. Per field, the aggregate wins when present and the
//! point reading is the fallback; a field absent from both is `None`.
//! Snapshots are built once and read-only afterwards.

use crate::data::PointReading;
use crate::forecast::DailyAggregate;

/// Description attached to snapshots built from live provider data
pub const SOURCE_LABEL: &str = "Data from Open-Meteo & NASA";

/// The unified view of current conditions driving advisory evaluation
///
/// Every numeric field is either a finite number or `None`; NaN and
/// raw-source placeholders never reach a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// Relative humidity in %
    pub humidity: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Precipitation probability in %
    pub rain_probability: Option<f64>,
    /// Cloud cover in %
    pub cloud_cover: Option<f64>,
    /// Visibility in km
    pub visibility: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
    /// Free-text conditions description
    pub description: Option<String>,
}

/// Builds the snapshot for "now" from whichever sources are available.
///
/// Pure function of its inputs. Wind speed falling back to the point
/// source is converted from m/s to km/h here (×3.6, one decimal); the
/// aggregate's wind is already km/h. With both inputs absent, every field
/// of the result is `None`.
pub fn build(today: Option<&DailyAggregate>, current: Option<&PointReading>) -> WeatherSnapshot {
    let temperature = today
        .and_then(|d| d.avg_temp)
        .or_else(|| current.and_then(PointReading::current_temperature));
    let humidity = today
        .and_then(|d| d.avg_humidity)
        .or_else(|| current.and_then(PointReading::current_humidity));
    let wind_speed = today.and_then(|d| d.avg_wind).or_else(|| {
        current
            .and_then(PointReading::current_wind_speed_mps)
            .map(mps_to_kmh)
    });

    // These metrics only exist on the time-series side.
    let rain_probability = today.map(|d| d.max_rain_prob);
    let cloud_cover = today.and_then(|d| d.avg_cloud);
    let visibility = today.and_then(|d| d.avg_visibility);
    let precipitation = today.and_then(|d| d.total_precipitation);

    let description = (today.is_some() || current.is_some()).then(|| SOURCE_LABEL.to_string());

    WeatherSnapshot {
        temperature: finite(temperature),
        humidity: finite(humidity),
        wind_speed: finite(wind_speed),
        rain_probability: finite(rain_probability),
        cloud_cover: finite(cloud_cover),
        visibility: finite(visibility),
        precipitation: finite(precipitation),
        description,
    }
}

/// Converts m/s to km/h, rounded to one decimal.
fn mps_to_kmh(mps: f64) -> f64 {
    (mps * 3.6 * 10.0).round() / 10.0
}

/// Drops non-finite values so NaN can never leave the builder.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
