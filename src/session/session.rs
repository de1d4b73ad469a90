use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::runtime::{use_context, ContextMisuseError};
use crate::store::{Reducer, Store, SubscriptionGuard};

/// The authenticated user's profile data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_url: String,
}

impl Identity {
    /// The built-in demo credential used by [`SessionStore::default`].
    pub fn demo_user() -> Self {
        Self {
            name: "Sajesh".to_string(),
            email: "sajesh@example.com".to_string(),
            password: "ggez".to_string(),
            avatar_url: "https://api.dicebear.com/7.x/adventurer/svg?seed=Sajesh".to_string(),
        }
    }
}

/// Current authentication state.
///
/// Invariant: `is_authenticated` is true exactly when `identity` is set;
/// the reducer maintains it on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub is_authenticated: bool,
}

/// Errors surfaced by session commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Login attempted with a non-matching email/password pair. State is
    /// left untouched.
    #[error("invalid credentials")]
    InvalidCredentials,
}

enum SessionAction {
    LoggedIn(Identity),
    LoggedOut,
}

struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;

    fn reduce(_state: SessionState, action: SessionAction) -> SessionState {
        match action {
            SessionAction::LoggedIn(identity) => SessionState {
                identity: Some(identity),
                is_authenticated: true,
            },
            SessionAction::LoggedOut => SessionState {
                identity: None,
                is_authenticated: false,
            },
        }
    }
}

/// Store holding the authenticated-identity value.
///
/// The store validates login attempts against one statically configured
/// credential; the check is synchronous and local, so there is no loading
/// state. Handles are cheap to clone and share the same state.
///
/// # Examples
///
/// ```
/// use valise::session::SessionStore;
///
/// let session = SessionStore::default();
/// assert!(!session.session().is_authenticated);
///
/// session.login("sajesh@example.com", "ggez").unwrap();
/// assert!(session.session().is_authenticated);
///
/// session.logout();
/// assert!(session.session().identity.is_none());
/// ```
#[derive(Clone)]
pub struct SessionStore {
    store: Store<SessionReducer>,
    credential: Identity,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a session store that accepts the given credential.
    pub fn new(credential: Identity) -> Self {
        Self {
            store: Store::new(SessionState::default()),
            credential,
        }
    }

    /// Validate a login attempt.
    ///
    /// On a match the store transitions to authenticated with the configured
    /// identity. On a mismatch the state is left untouched and
    /// [`SessionError::InvalidCredentials`] is returned.
    pub fn login(&self, email: &str, password: &str) -> Result<(), SessionError> {
        if self.credential.email == email && self.credential.password == password {
            tracing::info!(email, "login succeeded");
            self.store
                .dispatch(SessionAction::LoggedIn(self.credential.clone()));
            Ok(())
        } else {
            tracing::warn!(email, "login rejected");
            Err(SessionError::InvalidCredentials)
        }
    }

    /// Transition to unauthenticated, clearing the identity. Idempotent.
    pub fn logout(&self) {
        tracing::info!("logged out");
        self.store.dispatch(SessionAction::LoggedOut);
    }

    /// Get the current session snapshot.
    pub fn session(&self) -> SessionState {
        self.store.get()
    }

    /// Subscribe to session changes.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionGuard<SessionState>
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Identity::demo_user())
    }
}

/// Resolve the [`SessionStore`] provided by the nearest enclosing scope.
pub fn use_session() -> Result<SessionStore, ContextMisuseError> {
    use_context::<SessionStore>()
}
