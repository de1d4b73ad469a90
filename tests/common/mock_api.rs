//! Mock cities REST API for integration tests.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use valise::cities::{City, NewCity};

#[derive(Clone)]
struct ApiState {
    cities: Arc<Mutex<Vec<City>>>,
    next_id: Arc<AtomicU64>,
    fail: Arc<AtomicBool>,
}

/// In-process REST server speaking the cities wire protocol.
pub struct MockApi {
    pub addr: SocketAddr,
    state: ApiState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockApi {
    /// Start a new mock server seeded with `cities`.
    pub async fn start(cities: Vec<City>) -> Self {
        let next_id = cities.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let state = ApiState {
            cities: Arc::new(Mutex::new(cities)),
            next_id: Arc::new(AtomicU64::new(next_id)),
            fail: Arc::new(AtomicBool::new(false)),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/cities", get(list_cities).post(create_city))
            .route("/cities/{id}", get(get_city).delete(delete_city))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Get the base URL for this mock server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make every subsequent request answer 500.
    pub fn fail_requests(&self, fail: bool) {
        self.state.fail.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the server-side collection.
    pub async fn cities(&self) -> Vec<City> {
        self.state.cities.lock().await.clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

fn check(state: &ApiState) -> Result<(), StatusCode> {
    if state.fail.load(Ordering::SeqCst) {
        Err(StatusCode::INTERNAL_SERVER_ERROR)
    } else {
        Ok(())
    }
}

async fn list_cities(State(state): State<ApiState>) -> Result<Json<Vec<City>>, StatusCode> {
    check(&state)?;
    Ok(Json(state.cities.lock().await.clone()))
}

async fn get_city(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
) -> Result<Json<City>, StatusCode> {
    check(&state)?;
    state
        .cities
        .lock()
        .await
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_city(
    State(state): State<ApiState>,
    Json(city): Json<NewCity>,
) -> Result<(StatusCode, Json<City>), StatusCode> {
    check(&state)?;
    let created = City {
        id: state.next_id.fetch_add(1, Ordering::SeqCst),
        name: city.name,
        country: city.country,
        notes: city.notes,
        position: city.position,
    };
    state.cities.lock().await.push(created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_city(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    check(&state)?;
    state.cities.lock().await.retain(|c| c.id != id);
    Ok(StatusCode::NO_CONTENT)
}
