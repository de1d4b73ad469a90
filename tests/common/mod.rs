//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_api;

use tracing_subscriber::EnvFilter;
use valise::cities::City;

/// Route store logs through a test subscriber. Safe to call from every
/// test; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Shorthand for a city with only the required fields set.
pub fn city(id: u64, name: &str) -> City {
    City {
        id,
        name: name.to_string(),
        country: String::new(),
        notes: String::new(),
        position: None,
    }
}
