//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherSource` trait
//! - Typed provider schemas and the records we show and persist
//! - Daily forecast summaries, the console report and the JSON weather log
//! - The interactive session that ties them together
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod report;
pub mod session;
pub mod summary;

pub use config::Config;
pub use error::WeatherError;
pub use model::{CurrentWeather, DailySummary, LogRecord};
pub use provider::{LazySource, WeatherSource, openweather::OpenWeatherProvider, source_from_config};
pub use session::{Outcome, Session};
