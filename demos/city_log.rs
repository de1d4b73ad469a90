//! City log walkthrough: syncing a remote collection through the store
//!
//! Expects a REST backend with a /cities collection on localhost:8000,
//! e.g. `json-server --watch cities.json --port 8000`.

use std::sync::Arc;
use valise::cities::{CitiesStore, HttpCityGateway, NewCity};
use valise::config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("=== City Log Walkthrough ===\n");

    println!("1. Loading configuration");
    let config = AppConfig::default();
    println!("   API at {}", config.api.base_url);

    println!("\n2. Initial sync");
    let gateway = Arc::new(HttpCityGateway::new(config.api.base_url.clone()));
    let cities = CitiesStore::init(gateway).await;

    let state = cities.state();
    if let Some(message) = &state.error {
        println!("   sync failed: {message}");
        println!("\n   Start a REST backend first, for example:");
        println!("   json-server --watch cities.json --port 8000");
        return;
    }
    println!("   {} cities synced", state.cities.len());

    // Log every snapshot the store publishes
    let _guard = cities.subscribe(|state| {
        println!(
            "   [Cities] {} entries, loading: {}, current: {}",
            state.cities.len(),
            state.is_loading,
            state
                .current_city
                .as_ref()
                .map(|city| city.name.as_str())
                .unwrap_or("-")
        );
    });

    println!("\n3. Creating a city");
    cities.create(NewCity::named("Porto")).await;
    let created = cities.state().current_city;

    println!("\n4. Selecting it");
    if let Some(created) = &created {
        cities.get_city(created.id).await;
    }

    println!("\n5. Deleting it again");
    if let Some(created) = &created {
        cities.delete(created.id).await;
    }

    println!("\n✓ City log walkthrough complete!");
}
