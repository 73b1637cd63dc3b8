//! Command-line interface parsing for Vietsky
//!
//! This module handles parsing of CLI arguments using clap: the city to
//! look up, the advisory context, an optional specific date, and the
//! number of forecast days to display.

use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;

use crate::advice::Context;
use crate::data::{all_cities, get_city_by_id, City};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified city is not supported
    #[error("Unknown city: '{0}'. Supported cities: hanoi, ho-chi-minh, da-nang, can-tho")]
    UnknownCity(String),

    /// The specified context name is not recognized
    #[error("Invalid context: '{0}'. Valid contexts: general, travel, work, sport, outdoor")]
    InvalidContext(String),

    /// The specified date could not be parsed
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Vietsky - city weather conditions, forecasts, and advice
#[derive(Parser, Debug)]
#[command(name = "vietsky")]
#[command(about = "City weather conditions, daily forecasts, and situational advice")]
#[command(version)]
pub struct Cli {
    /// City to look up (hanoi, ho-chi-minh, da-nang, can-tho)
    pub city: Option<String>,

    /// Advisory context: general, travel, work, sport, outdoor
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Show conditions for a specific date (YYYY-MM-DD) instead of today
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Number of forecast days to display
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub days: usize,
}

/// Validated configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The city to report on
    pub city: &'static City,
    /// Advisory context for rule evaluation
    pub context: Context,
    /// Specific date to evaluate, if given
    pub date: Option<NaiveDate>,
    /// Number of forecast days to display
    pub days: usize,
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// The city defaults to the first supported city (Hanoi) and the
    /// context to General.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let city = match &cli.city {
            Some(name) => {
                get_city_by_id(name).ok_or_else(|| CliError::UnknownCity(name.clone()))?
            }
            None => &all_cities()[0],
        };

        let context = match &cli.context {
            Some(name) => {
                Context::from_str(name).ok_or_else(|| CliError::InvalidContext(name.clone()))?
            }
            None => Context::General,
        };

        let date = match &cli.date {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| CliError::InvalidDate(raw.clone()))?,
            ),
            None => None,
        };

        Ok(RunConfig {
            city,
            context,
            date,
            days: cli.days,
        })
    }
}
