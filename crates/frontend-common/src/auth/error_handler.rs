//! Keeps the in-memory session in step with what the gateway does on its own
//!
//! The gateway refreshes tokens and clears storage without going through the
//! store, so the store registers [`SessionSync`] to hear about it.

use super::context::{AuthAction, SessionState};
use aula_core::{REFRESH_TOKEN_KEY, SessionStorage};
use aula_http::SessionObserver;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

pub(crate) type SharedState = Arc<Mutex<SessionState>>;

/// Apply `action` to the shared state
pub(crate) fn apply(state: &SharedState, action: AuthAction) {
    let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = guard.reduce(action);
}

pub(crate) struct SessionSync {
    state: SharedState,
    storage: Arc<dyn SessionStorage>,
}

impl SessionSync {
    pub(crate) fn new(state: SharedState, storage: Arc<dyn SessionStorage>) -> Self {
        Self { state, storage }
    }
}

impl SessionObserver for SessionSync {
    fn access_token_refreshed(&self, access_token: &str) {
        debug!("Syncing refreshed access token into session state");
        // Picks up a rotated refresh token written alongside the access token
        let refresh_token = self.storage.get_item(REFRESH_TOKEN_KEY).ok().flatten();
        apply(
            &self.state,
            AuthAction::TokenRefreshed {
                access_token: access_token.to_string(),
                refresh_token,
            },
        );
    }

    fn session_expired(&self) {
        info!("Session expired, signing out");
        apply(&self.state, AuthAction::SessionExpired);
    }
}
