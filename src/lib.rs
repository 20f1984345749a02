//! MCP server exposing WeatherAPI.com lookups as tools.
//!
//! Each tool issues one GET request to the provider and returns formatted
//! text. Per-call failures are rendered into that text rather than returned
//! as MCP errors; only configuration problems at startup are fatal.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod service;

pub use client::{clamp_forecast_days, WeatherClient};
pub use config::{AuxiliaryServices, WeatherConfig};
pub use error::{ConfigError, WeatherError};
pub use service::Weather;
