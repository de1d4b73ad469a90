//! Authentication session store.
//!
//! Validates login attempts against one statically configured credential
//! and toggles the authenticated-identity state. Two states, no loading:
//! the check is synchronous and local.

mod session;

pub use session::{use_session, Identity, SessionError, SessionState, SessionStore};
