//! Vietsky Library
//!
//! Core weather data handling for the Vietsky CLI: provider clients,
//! daily aggregation, snapshot building, and the advisory rule engine.

pub mod advice;
pub mod cli;
pub mod data;
pub mod forecast;
pub mod snapshot;
