use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::cities::city::{City, NewCity};
use crate::cities::gateway::{CityGateway, GatewayError};
use crate::runtime::{use_context, ContextMisuseError};
use crate::store::{Reducer, Store, SubscriptionGuard};

/// Snapshot of the cities collection and its request state.
///
/// `is_loading` is true only while a command is in flight; `error` holds the
/// message of the most recent failed command and is cleared when the next
/// command starts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CitiesState {
    pub cities: Vec<City>,
    pub is_loading: bool,
    pub current_city: Option<City>,
    pub error: Option<String>,
}

enum CitiesAction {
    Loading,
    CitiesLoaded(Vec<City>),
    CityLoaded(City),
    CityCreated(City),
    CityDeleted(u64),
    Rejected(String),
}

struct CitiesReducer;

impl Reducer for CitiesReducer {
    type State = CitiesState;
    type Action = CitiesAction;

    fn reduce(state: CitiesState, action: CitiesAction) -> CitiesState {
        match action {
            CitiesAction::Loading => CitiesState {
                is_loading: true,
                error: None,
                ..state
            },
            CitiesAction::CitiesLoaded(cities) => CitiesState {
                cities,
                is_loading: false,
                error: None,
                ..state
            },
            CitiesAction::CityLoaded(city) => CitiesState {
                current_city: Some(city),
                is_loading: false,
                error: None,
                ..state
            },
            CitiesAction::CityCreated(city) => {
                let mut cities = state.cities;
                cities.push(city.clone());
                CitiesState {
                    cities,
                    is_loading: false,
                    current_city: Some(city),
                    error: None,
                }
            }
            CitiesAction::CityDeleted(id) => {
                let mut cities = state.cities;
                cities.retain(|city| city.id != id);
                CitiesState {
                    cities,
                    is_loading: false,
                    current_city: None,
                    error: None,
                }
            }
            CitiesAction::Rejected(message) => CitiesState {
                is_loading: false,
                error: Some(message),
                ..state
            },
        }
    }
}

/// Store synchronizing the cities collection with a remote data source.
///
/// Every command asserts the loading flag, awaits the gateway once, and
/// settles with exactly one terminal transition. Gateway failures never
/// escape a command: they are logged and recorded in the snapshot's `error`
/// slot. Each command draws a generation id; when a newer command starts
/// before an older one settles, the older settlement is discarded instead of
/// overwriting newer state.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use valise::cities::{CitiesStore, HttpCityGateway};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let gateway = Arc::new(HttpCityGateway::new("http://localhost:8000"));
/// let cities = CitiesStore::init(gateway).await;
/// println!("{} cities synced", cities.state().cities.len());
/// # }
/// ```
#[derive(Clone)]
pub struct CitiesStore {
    store: Store<CitiesReducer>,
    gateway: Arc<dyn CityGateway>,
    generation: Arc<AtomicU64>,
}

impl std::fmt::Debug for CitiesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitiesStore").finish_non_exhaustive()
    }
}

impl CitiesStore {
    /// Create the store and perform the one-time initial load of the full
    /// collection.
    ///
    /// A failed initial load leaves the collection empty and records the
    /// failure in the `error` slot, like any other command.
    pub async fn init(gateway: Arc<dyn CityGateway>) -> Self {
        let store = Self {
            store: Store::new(CitiesState::default()),
            gateway,
            generation: Arc::new(AtomicU64::new(0)),
        };
        store.list_all().await;
        store
    }

    async fn list_all(&self) {
        let generation = self.begin();
        match self.gateway.fetch_all().await {
            Ok(cities) => self.settle(generation, CitiesAction::CitiesLoaded(cities)),
            Err(err) => self.reject(generation, "loading cities", err),
        }
    }

    /// Fetch one city and select it as the current city.
    pub async fn get_city(&self, id: u64) {
        let generation = self.begin();
        match self.gateway.fetch_one(id).await {
            Ok(city) => self.settle(generation, CitiesAction::CityLoaded(city)),
            Err(err) => self.reject(generation, "loading city", err),
        }
    }

    /// Create a city on the backend, append the echoed record to the
    /// collection, and select it as the current city.
    pub async fn create(&self, city: NewCity) {
        let generation = self.begin();
        match self.gateway.create(&city).await {
            Ok(created) => self.settle(generation, CitiesAction::CityCreated(created)),
            Err(err) => self.reject(generation, "creating city", err),
        }
    }

    /// Delete a city on the backend, remove it from the collection, and
    /// clear the current selection.
    pub async fn delete(&self, id: u64) {
        let generation = self.begin();
        match self.gateway.delete(id).await {
            Ok(()) => self.settle(generation, CitiesAction::CityDeleted(id)),
            Err(err) => self.reject(generation, "deleting city", err),
        }
    }

    /// Get the current snapshot.
    pub fn state(&self) -> CitiesState {
        self.store.get()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionGuard<CitiesState>
    where
        F: Fn(&CitiesState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Start a command: take the next generation and assert the loading
    /// flag before the network call is issued.
    fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.dispatch(CitiesAction::Loading);
        generation
    }

    /// Apply a terminal transition unless a newer command superseded this
    /// invocation while it was in flight.
    fn settle(&self, generation: u64, action: CitiesAction) {
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale settlement");
            return;
        }
        self.store.dispatch(action);
    }

    fn reject(&self, generation: u64, op: &'static str, err: GatewayError) {
        tracing::error!(error = %err, "{} failed", op);
        self.settle(generation, CitiesAction::Rejected(err.to_string()));
    }
}

/// Resolve the [`CitiesStore`] provided by the nearest enclosing scope.
pub fn use_cities() -> Result<CitiesStore, ContextMisuseError> {
    use_context::<CitiesStore>()
}
