//! Provider scopes for sharing store handles.
//!
//! This module provides the infrastructure for registering store handles
//! and resolving them from anywhere beneath their provider.

mod scope;

pub use scope::{use_context, ContextMisuseError, Scope};
