//! Daily forecast aggregation
//!
//! This module reduces the raw hourly observation series into per-day
//! summary statistics. Each metric has a fixed reduction policy:
//!
//! - mean: temperature, humidity, wind speed, cloud cover, visibility
//!   (visibility is converted from meters to kilometers first)
//! - maximum: rain probability, UV index
//! - sum: precipitation, rounded to one decimal place
//!
//! Missing samples are never conflated with zero. A mean- or sum-class
//! metric with no samples on a day aggregates to `None`. The max-class
//! metrics instead default to `0.0` on a sample-less day; the upstream
//! contract supplies full-length probability/UV arrays, so in practice
//! those days do not occur. Precipitation is the one metric where an
//! absent hour simply contributes nothing to the day's total.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::data::HourlySeries;

/// Reduced statistics for one calendar day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyAggregate {
    /// Mean temperature in °C
    pub avg_temp: Option<f64>,
    /// Mean relative humidity in %
    pub avg_humidity: Option<f64>,
    /// Mean wind speed in km/h
    pub avg_wind: Option<f64>,
    /// Maximum precipitation probability in %
    pub max_rain_prob: f64,
    /// Mean cloud cover in %
    pub avg_cloud: Option<f64>,
    /// Mean visibility in km
    pub avg_visibility: Option<f64>,
    /// Total precipitation in mm, rounded to one decimal
    pub total_precipitation: Option<f64>,
    /// Maximum UV index
    pub max_uv: f64,
}

/// Reduces an hourly series into per-day aggregates.
///
/// A day appears in the result if and only if at least one timestamp fell
/// on it. Empty input yields an empty map. The computation is pure and
/// idempotent; callers needing an ordered window should use
/// [`forecast_window`].
pub fn aggregate(series: &HourlySeries) -> BTreeMap<NaiveDate, DailyAggregate> {
    let mut days: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for (i, time) in series.times.iter().enumerate() {
        days.entry(time.date()).or_default().push(i);
    }

    days.into_iter()
        .map(|(day, hours)| {
            let stats = DailyAggregate {
                avg_temp: mean(samples(&series.temperature, &hours)),
                avg_humidity: mean(samples(&series.humidity, &hours)),
                avg_wind: mean(samples(&series.wind_speed, &hours)),
                max_rain_prob: max_or_zero(samples(&series.rain_probability, &hours)),
                avg_cloud: mean(samples(&series.cloud_cover, &hours)),
                avg_visibility: mean(samples(&series.visibility, &hours).map(|v| v / 1000.0)),
                total_precipitation: total(samples(&series.precipitation, &hours)),
                max_uv: max_or_zero(samples(&series.uv_index, &hours)),
            };
            (day, stats)
        })
        .collect()
}

/// Returns the earliest `days` aggregates on or after `from`, in ascending
/// date order.
pub fn forecast_window(
    daily: &BTreeMap<NaiveDate, DailyAggregate>,
    from: NaiveDate,
    days: usize,
) -> Vec<(NaiveDate, &DailyAggregate)> {
    daily
        .range(from..)
        .take(days)
        .map(|(day, stats)| (*day, stats))
        .collect()
}

/// Iterates the samples of `metric` present at the given hour positions.
///
/// Positions beyond the metric's length and `None` entries are skipped:
/// an absent sample must not contribute to any statistic.
fn samples<'a>(
    metric: &'a [Option<f64>],
    hours: &'a [usize],
) -> impl Iterator<Item = f64> + 'a {
    hours.iter().filter_map(move |&i| metric.get(i).copied().flatten())
}

/// Arithmetic mean, or `None` when there are no samples.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (count, sum) = values.fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    (count > 0).then(|| sum / count as f64)
}

/// Maximum sample, or `0.0` when there are none.
fn max_or_zero(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |a| a.max(v)))
    })
    .unwrap_or(0.0)
}

/// Sum rounded to one decimal, or `None` when there are no samples.
fn total(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (count, sum) = values.fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    (count > 0).then(|| round1(sum))
}

/// Rounds to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn hours(stamps: &[&str]) -> Vec<NaiveDateTime> {
        stamps
            .iter()
            .map(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap())
            .collect()
    }

    fn present(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_constant_temperature_averages_to_itself() {
        let series = HourlySeries {
            times: hours(&[
                "2024-07-15T00:00",
                "2024-07-15T01:00",
                "2024-07-15T02:00",
                "2024-07-15T03:00",
            ]),
            temperature: present(&[10.0, 10.0, 10.0, 10.0]),
            ..Default::default()
        };

        let daily = aggregate(&series);
        assert_eq!(daily[&day("2024-07-15")].avg_temp, Some(10.0));
    }

    #[test]
    fn test_precipitation_totals_to_one_decimal() {
        let series = HourlySeries {
            times: hours(&[
                "2024-07-15T00:00",
                "2024-07-15T01:00",
                "2024-07-15T02:00",
                "2024-07-15T03:00",
            ]),
            precipitation: present(&[0.0, 1.2, 0.0, 0.3]),
            ..Default::default()
        };

        let daily = aggregate(&series);
        assert_eq!(daily[&day("2024-07-15")].total_precipitation, Some(1.5));
    }

    #[test]
    fn test_days_are_grouped_by_calendar_date() {
        let series = HourlySeries {
            times: hours(&[
                "2024-07-15T22:00",
                "2024-07-15T23:00",
                "2024-07-16T00:00",
            ]),
            temperature: present(&[20.0, 22.0, 30.0]),
            ..Default::default()
        };

        let daily = aggregate(&series);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[&day("2024-07-15")].avg_temp, Some(21.0));
        assert_eq!(daily[&day("2024-07-16")].avg_temp, Some(30.0));
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        let daily = aggregate(&HourlySeries::default());
        assert!(daily.is_empty());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let series = HourlySeries {
            times: hours(&["2024-07-15T00:00", "2024-07-15T01:00"]),
            temperature: present(&[25.4, 28.1]),
            rain_probability: present(&[30.0, 60.0]),
            precipitation: present(&[0.2, 0.11]),
            visibility: present(&[12000.0, 8000.0]),
            ..Default::default()
        };

        assert_eq!(aggregate(&series), aggregate(&series));
    }

    #[test]
    fn test_all_missing_mean_metric_is_none_not_zero() {
        let series = HourlySeries {
            times: hours(&["2024-07-15T00:00", "2024-07-15T01:00"]),
            temperature: vec![None, None],
            humidity: present(&[80.0, 90.0]),
            ..Default::default()
        };

        let stats = &aggregate(&series)[&day("2024-07-15")];
        assert_eq!(stats.avg_temp, None);
        assert_eq!(stats.avg_humidity, Some(85.0));
    }

    #[test]
    fn test_all_zero_metric_is_zero_not_none() {
        let series = HourlySeries {
            times: hours(&["2024-07-15T00:00", "2024-07-15T01:00"]),
            temperature: present(&[0.0, 0.0]),
            precipitation: present(&[0.0, 0.0]),
            ..Default::default()
        };

        let stats = &aggregate(&series)[&day("2024-07-15")];
        assert_eq!(stats.avg_temp, Some(0.0));
        assert_eq!(stats.total_precipitation, Some(0.0));
    }

    #[test]
    fn test_all_missing_precipitation_is_none() {
        let series = HourlySeries {
            times: hours(&["2024-07-15T00:00"]),
            ..Default::default()
        };

        let stats = &aggregate(&series)[&day("2024-07-15")];
        assert_eq!(stats.total_precipitation, None);
    }

    #[test]
    fn test_absent_precipitation_hours_contribute_nothing() {
        // Ragged array: only the first two hours have samples.
        let series = HourlySeries {
            times: hours(&[
                "2024-07-15T00:00",
                "2024-07-15T01:00",
                "2024-07-15T02:00",
                "2024-07-15T03:00",
            ]),
            precipitation: present(&[0.7, 0.8]),
            ..Default::default()
        };

        let stats = &aggregate(&series)[&day("2024-07-15")];
        assert_eq!(stats.total_precipitation, Some(1.5));
    }

    #[test]
    fn test_max_class_metrics_default_to_zero_without_samples() {
        let series = HourlySeries {
            times: hours(&["2024-07-15T00:00"]),
            temperature: present(&[28.0]),
            ..Default::default()
        };

        let stats = &aggregate(&series)[&day("2024-07-15")];
        assert_eq!(stats.max_rain_prob, 0.0);
        assert_eq!(stats.max_uv, 0.0);
    }

    #[test]
    fn test_rain_probability_takes_the_daily_maximum() {
        let series = HourlySeries {
            times: hours(&[
                "2024-07-15T00:00",
                "2024-07-15T01:00",
                "2024-07-15T02:00",
            ]),
            rain_probability: present(&[20.0, 85.0, 40.0]),
            uv_index: present(&[1.0, 7.5, 3.0]),
            ..Default::default()
        };

        let stats = &aggregate(&series)[&day("2024-07-15")];
        assert_eq!(stats.max_rain_prob, 85.0);
        assert_eq!(stats.max_uv, 7.5);
    }

    #[test]
    fn test_visibility_is_converted_to_kilometers() {
        let series = HourlySeries {
            times: hours(&["2024-07-15T00:00", "2024-07-15T01:00"]),
            visibility: present(&[24000.0, 10000.0]),
            ..Default::default()
        };

        let stats = &aggregate(&series)[&day("2024-07-15")];
        assert_eq!(stats.avg_visibility, Some(17.0));
    }

    #[test]
    fn test_ragged_metric_mean_uses_present_samples_only() {
        let series = HourlySeries {
            times: hours(&[
                "2024-07-15T00:00",
                "2024-07-15T01:00",
                "2024-07-15T02:00",
            ]),
            temperature: vec![Some(10.0), None],
            ..Default::default()
        };

        let stats = &aggregate(&series)[&day("2024-07-15")];
        assert_eq!(stats.avg_temp, Some(10.0));
    }

    #[test]
    fn test_forecast_window_starts_at_from_and_is_ordered() {
        let series = HourlySeries {
            times: hours(&[
                "2024-07-14T12:00",
                "2024-07-15T12:00",
                "2024-07-16T12:00",
                "2024-07-17T12:00",
            ]),
            temperature: present(&[20.0, 21.0, 22.0, 23.0]),
            ..Default::default()
        };

        let daily = aggregate(&series);
        let window = forecast_window(&daily, day("2024-07-15"), 2);

        assert_eq!(window.len(), 2);
        assert_eq!(window[0].0, day("2024-07-15"));
        assert_eq!(window[1].0, day("2024-07-16"));
    }

    #[test]
    fn test_forecast_window_is_capped_by_available_days() {
        let series = HourlySeries {
            times: hours(&["2024-07-15T12:00"]),
            ..Default::default()
        };

        let daily = aggregate(&series);
        assert_eq!(forecast_window(&daily, day("2024-07-15"), 5).len(), 1);
        assert!(forecast_window(&daily, day("2024-07-16"), 5).is_empty());
    }
}
