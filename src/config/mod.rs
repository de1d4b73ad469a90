//! TOML-backed application configuration.

mod config;

pub use config::{ApiConfig, AppConfig, ConfigError};
