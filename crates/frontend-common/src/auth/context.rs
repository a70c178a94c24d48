//! Session state and the transitions between authentication states

use aula_core::User;
use aula_http::client::error::SESSION_EXPIRED_MESSAGE;

/// Where the session is in the login lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    AuthError,
}

/// In-memory view of the current session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub status: AuthStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_user: None,
            access_token: None,
            refresh_token: None,
            // Loading until storage has been checked
            is_loading: true,
            last_error: None,
            status: AuthStatus::Anonymous,
        }
    }
}

/// Tokens and user that make up an established session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Session state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess(Session),
    LoginFailure(String),
    Logout,
    UpdateUser(User),
    RestoreSession(Session),
    TokenRefreshed {
        access_token: String,
        refresh_token: Option<String>,
    },
    SessionExpired,
}

impl SessionState {
    /// True only when both tokens and the user are known
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some() && self.access_token.is_some() && self.refresh_token.is_some()
    }

    fn signed_out(last_error: Option<String>, status: AuthStatus) -> Self {
        Self {
            current_user: None,
            access_token: None,
            refresh_token: None,
            is_loading: false,
            last_error,
            status,
        }
    }

    fn established(session: Session) -> Self {
        Self {
            current_user: Some(session.user),
            access_token: Some(session.access_token),
            refresh_token: Some(session.refresh_token),
            is_loading: false,
            last_error: None,
            status: AuthStatus::Authenticated,
        }
    }

    /// Apply `action` and return the resulting state
    #[must_use]
    pub fn reduce(&self, action: AuthAction) -> Self {
        match action {
            AuthAction::LoginStart => Self {
                is_loading: true,
                last_error: None,
                status: AuthStatus::Authenticating,
                ..self.clone()
            },
            AuthAction::LoginSuccess(session) | AuthAction::RestoreSession(session) => {
                Self::established(session)
            }
            AuthAction::LoginFailure(message) => {
                Self::signed_out(Some(message), AuthStatus::AuthError)
            }
            AuthAction::Logout => Self::signed_out(None, AuthStatus::Anonymous),
            AuthAction::UpdateUser(user) => Self {
                current_user: Some(user),
                ..self.clone()
            },
            AuthAction::TokenRefreshed {
                access_token,
                refresh_token,
            } => {
                // A refresh racing a logout must not resurrect the session
                if self.refresh_token.is_none() {
                    return self.clone();
                }
                Self {
                    access_token: Some(access_token),
                    refresh_token: refresh_token.or_else(|| self.refresh_token.clone()),
                    ..self.clone()
                }
            }
            // Only a live session can expire; an explicit logout stays silent
            AuthAction::SessionExpired if self.refresh_token.is_none() => self.clone(),
            AuthAction::SessionExpired => Self::signed_out(
                Some(SESSION_EXPIRED_MESSAGE.to_string()),
                AuthStatus::Anonymous,
            ),
        }
    }
}
