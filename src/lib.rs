//! # Valise
//!
//! Reducer-based state containers for client-side applications.
//!
//! Valise provides two levels of abstraction for managing application state:
//!
//! ## Store (Low-level primitives)
//!
//! A generic container pairing a pure reducer with subscriptions:
//! - `Store<R>` - Thread-safe state container driven by a `Reducer`
//! - `SubscriptionGuard` - Subscription handle that unhooks itself on drop
//! - `Scope` - Tree-scoped provider that hands shared values to nested code
//!
//! ## Domain stores (High-level state management)
//!
//! Ready-made stores for an application's session and remote data:
//! - `SessionStore` - Credential-gated authentication state
//! - `CitiesStore` - REST-backed cities collection with stale-response fencing

pub mod cities;
pub mod config;
pub mod runtime;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use cities::{use_cities, CitiesState, CitiesStore};
pub use runtime::{use_context, ContextMisuseError, Scope};
pub use session::{use_session, SessionState, SessionStore};
pub use store::{Reducer, Store, SubscriptionGuard};
