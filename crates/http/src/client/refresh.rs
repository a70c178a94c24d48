//! Access-token refresh after a `401`

use super::ApiGateway;
use super::config::REFRESH_PATH;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, RefreshRequest, RefreshResponse};
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

/// Receives session changes made by the gateway on its own.
///
/// The session store registers one of these so its in-memory state follows
/// what the interceptor writes to storage.
pub trait SessionObserver: Send + Sync {
    /// A new access token was stored after a successful refresh
    fn access_token_refreshed(&self, access_token: &str);

    /// Storage was cleared because the session could not be renewed
    fn session_expired(&self);
}

impl ApiGateway {
    /// Hold the session lock while writing the token pair.
    ///
    /// Refreshes take the same lock, so a login or logout never interleaves
    /// with a refresh writing stale tokens back.
    pub async fn lock_session(&self) -> OwnedMutexGuard<()> {
        self.inner.session_lock.clone().lock_owned().await
    }

    /// Obtain a fresh access token after `rejected` was refused.
    ///
    /// Concurrent callers queue on the session lock. A caller that finds a
    /// different token in storage once it gets the lock reuses it rather than
    /// refreshing a second time.
    pub(crate) async fn refresh_after_unauthorized(
        &self,
        rejected: Option<&str>,
    ) -> Result<String, ClientError> {
        let _guard = self.lock_session().await;

        let storage = self.storage();
        match storage.get_item(ACCESS_TOKEN_KEY)? {
            Some(current) if rejected != Some(current.as_str()) => {
                debug!("Access token already refreshed by a concurrent request");
                return Ok(current);
            }
            // Signed out while the request was in flight
            None if rejected.is_some() => {
                debug!("Session ended before the rejection arrived");
                return Err(ClientError::SessionExpired);
            }
            _ => {}
        }

        let Some(refresh) = storage.get_item(REFRESH_TOKEN_KEY)? else {
            info!("No refresh token stored, ending session");
            self.expire_session();
            return Err(ClientError::SessionExpired);
        };

        let tokens = match self.request_access_token(&refresh).await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(error = %err, "Token refresh failed, ending session");
                self.expire_session();
                return Err(ClientError::SessionExpired);
            }
        };

        storage.set_item(ACCESS_TOKEN_KEY, &tokens.access)?;
        if let Some(rotated) = &tokens.refresh {
            storage.set_item(REFRESH_TOKEN_KEY, rotated)?;
        }
        info!("Access token refreshed");

        if let Some(observer) = self.observer() {
            observer.access_token_refreshed(&tokens.access);
        }
        Ok(tokens.access)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The request is public and bounded by the refresh timeout, so it can
    /// never trigger another refresh.
    pub async fn refresh_access_token(
        &self,
        refresh: &str,
    ) -> Result<RefreshResponse, ClientError> {
        let request = ApiRequest::post(REFRESH_PATH)
            .public()
            .timeout(self.inner.refresh_timeout)
            .json(&RefreshRequest { refresh })?;

        // Dispatched directly: a rejected refresh is final
        let response = self.dispatch(&request, None).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, &body));
        }
        Self::decode(REFRESH_PATH, response).await
    }

    async fn request_access_token(&self, refresh: &str) -> Result<RenewedTokens, ClientError> {
        let response = self.refresh_access_token(refresh).await?;
        let access = response
            .access
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ClientError::MalformedResponse("refresh response has no access token".into())
            })?;
        Ok(RenewedTokens {
            access,
            refresh: response.refresh.filter(|token| !token.is_empty()),
        })
    }

    /// Drop the stored session and tell the observer
    fn expire_session(&self) {
        if let Err(err) = self.storage().clear_session() {
            warn!(error = %err, "Failed to clear session storage");
        }
        if let Some(observer) = self.observer() {
            observer.session_expired();
        }
    }
}

struct RenewedTokens {
    access: String,
    refresh: Option<String>,
}
