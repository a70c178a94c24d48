//! Session store: login, logout and restore on top of the API gateway

use super::context::{AuthAction, Session, SessionState};
use super::error_handler::{SessionSync, SharedState, apply};
use super::error_messages::login_error_message;
use aula_core::{
    ACCESS_TOKEN_KEY, AuthResponse, Credentials, REFRESH_TOKEN_KEY, SessionStorage, StorageError,
    USER_KEY, User,
};
use aula_http::{ApiGateway, ClientError};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Owns the current session and keeps it persisted.
///
/// Auth failures never surface as errors here; they land in
/// [`SessionState::last_error`] and the boolean returned by [`Self::login`].
#[derive(Clone)]
pub struct SessionStore {
    gateway: ApiGateway,
    state: SharedState,
}

impl SessionStore {
    /// Create a store and register it for the gateway's session signals
    pub fn new(gateway: ApiGateway) -> Self {
        let state: SharedState = Arc::new(Mutex::new(SessionState::default()));
        gateway.set_session_observer(Arc::new(SessionSync::new(
            state.clone(),
            gateway.storage().clone(),
        )));
        Self { gateway, state }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().current_user
    }

    fn storage(&self) -> &Arc<dyn SessionStorage> {
        self.gateway.storage()
    }

    /// Restore a persisted session without touching the network.
    ///
    /// Anything short of a complete, readable session is wiped.
    pub async fn bootstrap(&self) -> SessionState {
        let _guard = self.gateway.lock_session().await;

        match read_session(self.storage().as_ref()) {
            Ok(Some(session)) => {
                info!(username = %session.user.username, "Restored session");
                apply(&self.state, AuthAction::RestoreSession(session));
            }
            Ok(None) => {
                debug!("No stored session");
                self.wipe_storage();
                apply(&self.state, AuthAction::Logout);
            }
            Err(err) => {
                warn!(error = %err, "Stored session is unreadable, discarding it");
                self.wipe_storage();
                apply(&self.state, AuthAction::Logout);
            }
        }
        self.state()
    }

    /// Log in and persist the new session.
    ///
    /// Returns `false` when login fails; the reason is in
    /// [`SessionState::last_error`] and nothing is persisted.
    pub async fn login(&self, credentials: &Credentials) -> bool {
        apply(&self.state, AuthAction::LoginStart);
        info!(username = %credentials.username, "Logging in");

        let session = match self.gateway.login(credentials).await.and_then(complete_session) {
            Ok(session) => session,
            Err(err) => {
                warn!(username = %credentials.username, error = %err, "Login failed");
                apply(&self.state, AuthAction::LoginFailure(login_error_message(&err)));
                return false;
            }
        };

        let _guard = self.gateway.lock_session().await;
        if let Err(err) = write_session(self.storage().as_ref(), &session) {
            warn!(error = %err, "Failed to persist session");
            self.wipe_storage();
            let err = ClientError::from(err);
            apply(&self.state, AuthAction::LoginFailure(err.user_message()));
            return false;
        }

        info!(username = %session.user.username, role = %session.user.role, "Logged in");
        apply(&self.state, AuthAction::LoginSuccess(session));
        true
    }

    /// End the session locally, then ask the server to revoke the refresh
    /// token. The local session is gone even if the server call fails.
    pub async fn logout(&self) {
        let refresh_token = {
            let _guard = self.gateway.lock_session().await;
            let refresh_token = self.storage().get_item(REFRESH_TOKEN_KEY).ok().flatten();
            self.wipe_storage();
            apply(&self.state, AuthAction::Logout);
            refresh_token
        };
        info!("Logged out");

        if let Some(refresh_token) = refresh_token {
            if let Err(err) = self.gateway.blacklist_refresh_token(&refresh_token).await {
                debug!(error = %err, "Refresh token revocation failed, ignoring");
            }
        }
    }

    /// Replace the stored user record; tokens are left alone
    pub fn update_user(&self, user: User) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&user)?;
        self.storage().set_item(USER_KEY, &serialized)?;
        apply(&self.state, AuthAction::UpdateUser(user));
        Ok(())
    }

    /// Fetch the current profile from the server and store it
    pub async fn reload_profile(&self) -> Result<User, ClientError> {
        let user = self.gateway.get_profile().await?;
        self.update_user(user.clone())?;
        Ok(user)
    }

    fn wipe_storage(&self) {
        if let Err(err) = self.storage().clear_session() {
            warn!(error = %err, "Failed to clear session storage");
        }
    }
}

/// A login only counts when the server sent both tokens and the user
fn complete_session(response: AuthResponse) -> Result<Session, ClientError> {
    match response {
        AuthResponse {
            access: Some(access_token),
            refresh: Some(refresh_token),
            user: Some(user),
        } if !access_token.is_empty() && !refresh_token.is_empty() => Ok(Session {
            user,
            access_token,
            refresh_token,
        }),
        _ => Err(ClientError::MalformedResponse(
            "login response is missing tokens or user".into(),
        )),
    }
}

fn read_session(storage: &dyn SessionStorage) -> Result<Option<Session>, StorageError> {
    let access_token = storage.get_item(ACCESS_TOKEN_KEY)?;
    let refresh_token = storage.get_item(REFRESH_TOKEN_KEY)?;
    let user = storage.get_item(USER_KEY)?;

    let (Some(access_token), Some(refresh_token), Some(user)) = (access_token, refresh_token, user)
    else {
        return Ok(None);
    };
    if access_token.is_empty() || refresh_token.is_empty() {
        return Ok(None);
    }

    Ok(Some(Session {
        user: serde_json::from_str(&user)?,
        access_token,
        refresh_token,
    }))
}

fn write_session(storage: &dyn SessionStorage, session: &Session) -> Result<(), StorageError> {
    storage.set_item(ACCESS_TOKEN_KEY, &session.access_token)?;
    storage.set_item(REFRESH_TOKEN_KEY, &session.refresh_token)?;
    storage.set_item(USER_KEY, &serde_json::to_string(&session.user)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_core::MemoryStorage;

    #[test]
    fn test_read_session_requires_every_key() {
        let storage = MemoryStorage::new();
        storage.set_item(ACCESS_TOKEN_KEY, "a1").unwrap();
        storage.set_item(REFRESH_TOKEN_KEY, "r1").unwrap();
        assert!(read_session(&storage).unwrap().is_none());

        storage.set_item(USER_KEY, "not json").unwrap();
        assert!(matches!(
            read_session(&storage),
            Err(StorageError::Corrupted(_))
        ));
    }

    #[test]
    fn test_incomplete_login_response_is_rejected() {
        let response = AuthResponse {
            access: Some("a1".into()),
            refresh: None,
            user: None,
        };
        assert!(matches!(
            complete_session(response),
            Err(ClientError::MalformedResponse(_))
        ));
    }
}
