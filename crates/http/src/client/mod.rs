//! Aula API gateway
//!
//! Every call goes through [`ApiGateway::send`], which attaches the stored
//! bearer token and performs the one-shot token refresh on `401`.

pub mod attendance;
pub mod auth;
pub mod config;
pub mod courses;
pub mod dashboard;
pub mod error;
pub mod grades;
pub mod notifications;
pub mod participation;
pub mod periods;
pub mod predictions;
pub mod refresh;
pub mod request;
pub mod subjects;
pub mod users;

use aula_core::{ACCESS_TOKEN_KEY, MemoryStorage, SessionStorage};
use error::ClientError;
use refresh::SessionObserver;
use request::ApiRequest;
use reqwest::{Client, ClientBuilder, Response, header};
use serde::de::DeserializeOwned;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the Aula backend
#[derive(Clone)]
pub struct ApiGateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    client: Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
    request_timeout: Duration,
    refresh_timeout: Duration,
    // Serializes token refreshes with session writes made by the store
    session_lock: Arc<tokio::sync::Mutex<()>>,
    observer: RwLock<Option<Arc<dyn SessionObserver>>>,
}

impl ApiGateway {
    /// Create a gateway with in-memory storage and default timeouts
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ApiGatewayBuilder {
        ApiGatewayBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Storage holding the token pair and user record
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.inner.storage
    }

    /// Register the observer notified on token refresh and session expiry.
    ///
    /// Replaces any previously registered observer.
    pub fn set_session_observer(&self, observer: Arc<dyn SessionObserver>) {
        *self
            .inner
            .observer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(observer);
    }

    pub fn clear_session_observer(&self) {
        *self
            .inner
            .observer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn observer(&self) -> Option<Arc<dyn SessionObserver>> {
        self.inner
            .observer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn url(&self, path: &str) -> String {
        // Pagination links come back as absolute URLs
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.inner.base_url, path)
        }
    }

    fn stored_access_token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.inner.storage.get_item(ACCESS_TOKEN_KEY)?)
    }

    /// Send one attempt of `request` with the given bearer token
    async fn dispatch(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<Response, ClientError> {
        let mut builder = self
            .inner
            .client
            .request(request.method().clone(), self.url(request.path()));

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        // Set per request because the wasm client has no client-wide timeout
        let timeout = request
            .timeout_override()
            .unwrap_or(self.inner.request_timeout);
        builder = builder.timeout(timeout);

        debug!(
            method = %request.method(),
            path = request.path(),
            authenticated = bearer.is_some(),
            retried = request.is_retried(),
            "Sending request"
        );

        Ok(builder.send().await?)
    }

    /// Send a request, refreshing the access token once if it is rejected.
    ///
    /// Returns the successful response; any non-2xx status becomes a
    /// [`ClientError`].
    pub async fn send(&self, mut request: ApiRequest) -> Result<Response, ClientError> {
        loop {
            let bearer = if request.is_authenticated() {
                match request.bearer_override() {
                    Some(token) => Some(token.to_string()),
                    None => self.stored_access_token()?,
                }
            } else {
                None
            };

            let response = self.dispatch(&request, bearer.as_deref()).await?;
            let status = response.status();

            if request.should_refresh_on(status) {
                debug!(path = request.path(), "Access token rejected, refreshing");
                let access = self.refresh_after_unauthorized(bearer.as_deref()).await?;
                request.mark_retried(access);
                continue;
            }

            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            warn!(
                method = %request.method(),
                path = request.path(),
                status = status.as_u16(),
                "Request rejected"
            );
            return Err(ClientError::from_status(status, &body));
        }
    }

    /// Send a request and decode its JSON body
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let path = request.path().to_string();
        let response = self.send(request).await?;
        Self::decode(&path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ClientError> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| {
            warn!(path, error = %err, "Unexpected response body");
            ClientError::MalformedResponse(err.to_string())
        })
    }

    /// Send a request whose response body is irrelevant
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.send(request).await?;
        Ok(())
    }
}

/// Builder for [`ApiGateway`]
#[derive(Default)]
pub struct ApiGatewayBuilder {
    base_url: Option<String>,
    storage: Option<Arc<dyn SessionStorage>>,
    timeout: Option<Duration>,
    refresh_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiGatewayBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<ApiGateway, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is empty".into()));
        }

        let client = ClientBuilder::new()
            .user_agent(self.user_agent.as_deref().unwrap_or(config::USER_AGENT))
            .build()?;
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));

        Ok(ApiGateway {
            inner: Arc::new(GatewayInner {
                client,
                base_url,
                storage,
                request_timeout: self.timeout.unwrap_or(config::DEFAULT_TIMEOUT),
                refresh_timeout: self.refresh_timeout.unwrap_or(config::REFRESH_TIMEOUT),
                session_lock: Arc::new(tokio::sync::Mutex::new(())),
                observer: RwLock::new(None),
            }),
        })
    }
}
