//! Authentication endpoints

use super::ApiGateway;
use super::config::{LOGIN_PATH, PROFILE_PATH, TOKEN_BLACKLIST_PATH};
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::{AuthResponse, Credentials, RefreshRequest, User, UserProfile};
use serde::Serialize;

/// Editable part of the current user's account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl ApiGateway {
    /// Exchange credentials for a token pair and the user record.
    ///
    /// A `401` here means wrong credentials, never an expired session.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ClientError> {
        let request = ApiRequest::post(LOGIN_PATH).public().json(credentials)?;
        match self.execute(request).await {
            Err(ClientError::AuthenticationFailed(_)) => Err(ClientError::InvalidCredentials),
            other => other,
        }
    }

    /// Fetch the account behind the stored access token
    pub async fn get_profile(&self) -> Result<User, ClientError> {
        self.execute(ApiRequest::get(PROFILE_PATH)).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ClientError> {
        self.execute(ApiRequest::put(PROFILE_PATH).json(update)?)
            .await
    }

    /// Invalidate a refresh token server-side
    pub async fn blacklist_refresh_token(&self, refresh: &str) -> Result<(), ClientError> {
        let request = ApiRequest::post(TOKEN_BLACKLIST_PATH)
            .public()
            .json(&RefreshRequest { refresh })?;
        self.execute_empty(request).await
    }
}
