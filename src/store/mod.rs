//! Reducer-driven state containers.
//!
//! Stores pair one state value with a pure transition function and notify
//! subscribers with the fully-formed new snapshot after every dispatch.

mod reducer;
mod store;

pub use reducer::Reducer;
pub use store::{Store, SubscriptionGuard};
