//! Vietsky - city weather, forecasts, and advice
//!
//! Fetches hourly forecast data from Open-Meteo and daily point data from
//! NASA POWER for a supported city, reduces them into daily aggregates and
//! a current-conditions snapshot, and prints the report together with
//! situational advisories.

use chrono::{Duration, Local, NaiveDate};
use clap::Parser;

use vietsky::advice;
use vietsky::cli::{Cli, RunConfig};
use vietsky::data::{HourlySeries, OpenMeteoClient, PointReading, PowerClient};
use vietsky::forecast::{self, DailyAggregate};
use vietsky::snapshot::{self, WeatherSnapshot};

/// How many past days of point data to request for the "now" view
const POINT_WINDOW_DAYS: i64 = 5;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    run(config).await;
}

async fn run(config: RunConfig) {
    let today = Local::now().date_naive();
    let target = config.date.unwrap_or(today);

    let (series, reading) = fetch_sources(&config, today, target).await;

    if series.is_none() && reading.is_none() {
        eprintln!("⚠️ Data unavailable");
        std::process::exit(1);
    }

    let daily = series.as_ref().map(forecast::aggregate).unwrap_or_default();
    let current = snapshot::build(daily.get(&target), reading.as_ref());
    let advice_list = advice::generate_advice(&current, config.context);
    let window = forecast::forecast_window(&daily, target, config.days);

    print_report(&config, target, &current, &window, &advice_list);
}

/// Fetches both providers concurrently.
///
/// A failed source is reported on stderr and degraded to `None`; the rest
/// of the evaluation proceeds on whichever source succeeded.
async fn fetch_sources(
    config: &RunConfig,
    today: NaiveDate,
    target: NaiveDate,
) -> (Option<HourlySeries>, Option<PointReading>) {
    let meteo = OpenMeteoClient::new();
    let power = PowerClient::new();
    let lat = config.city.latitude;
    let lon = config.city.longitude;

    let hourly = async {
        match config.date {
            Some(date) => meteo.fetch_hourly_for_date(lat, lon, date).await,
            None => meteo.fetch_hourly(lat, lon).await,
        }
    };
    let point = async {
        match config.date {
            Some(date) => power.fetch_daily(lat, lon, date, date).await,
            None => {
                let start = today - Duration::days(POINT_WINDOW_DAYS);
                power.fetch_daily(lat, lon, start, today).await
            }
        }
    };

    let (hourly, point) = futures::future::join(hourly, point).await;

    let series = hourly
        .map_err(|err| eprintln!("warning: forecast source unavailable: {err}"))
        .ok();
    let reading = point
        .map_err(|err| eprintln!("warning: point source unavailable: {err}"))
        .ok();

    (series, reading)
}

/// Prints current conditions, the forecast strip, and the advisory list.
fn print_report(
    config: &RunConfig,
    target: NaiveDate,
    current: &WeatherSnapshot,
    window: &[(NaiveDate, &DailyAggregate)],
    advice_list: &[&str],
) {
    println!("{} — {}", config.city.name, target.format("%Y-%m-%d"));
    if let Some(desc) = &current.description {
        println!("{desc}");
    }
    println!();

    println!("Temperature:   {}", fmt_temp(current.temperature));
    println!("Humidity:      {}", fmt_unit(current.humidity, "%", 0));
    println!("Wind:          {}", fmt_unit(current.wind_speed, " km/h", 1));
    println!("Rain chance:   {}", fmt_unit(current.rain_probability, "%", 0));
    println!("Cloud cover:   {}", fmt_unit(current.cloud_cover, "%", 0));
    println!("Visibility:    {}", fmt_unit(current.visibility, " km", 2));
    println!("Precipitation: {}", fmt_unit(current.precipitation, " mm", 1));

    if !window.is_empty() {
        println!();
        println!("Forecast ({} days):", window.len());
        for (day, stats) in window {
            println!(
                "  {}  {:>5}  ☁️ {:>4}  💧 {:>4}  🌧️ {:>7}",
                day.format("%Y-%m-%d"),
                fmt_temp(stats.avg_temp),
                fmt_unit(stats.avg_cloud, "%", 0),
                fmt_unit(Some(stats.max_rain_prob), "%", 0),
                fmt_unit(stats.total_precipitation, " mm", 1),
            );
        }
    }

    println!();
    println!("Advice ({}):", config.context.label());
    if advice_list.is_empty() {
        println!("  No advisories for these conditions.");
    } else {
        for advice in advice_list {
            println!("  - {advice}");
        }
    }
}

/// Formats a temperature as a rounded °C value, or "--" when absent.
fn fmt_temp(value: Option<f64>) -> String {
    match value {
        Some(t) => format!("{}°C", t.round() as i64),
        None => "--".to_string(),
    }
}

/// Formats a numeric field with a unit suffix, or "--" when absent.
fn fmt_unit(value: Option<f64>, unit: &str, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}{unit}"),
        None => "--".to_string(),
    }
}
