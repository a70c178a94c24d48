//! Replayable description of one API call

use super::config::REFRESH_PATH;
use super::error::ClientError;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Everything needed to send a request, and to send it again after a
/// token refresh.
///
/// The `retried` marker is the guard against refresh loops: a request that
/// has already been replayed once is never refreshed again.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    headers: Vec<(String, String)>,
    bearer: Option<String>,
    timeout: Option<Duration>,
    authenticated: bool,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            bearer: None,
            timeout: None,
            authenticated: true,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Send without a bearer token and never refresh on 401
    #[must_use]
    pub fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Append the fields of a flat struct as query parameters.
    ///
    /// `null` fields are skipped; nested values are sent as JSON text.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, ClientError> {
        match serde_json::to_value(params)? {
            serde_json::Value::Object(map) => {
                for (key, value) in map {
                    if let Some(value) = query_value(value) {
                        self.query.push((key, value));
                    }
                }
            }
            serde_json::Value::Null => {}
            other => {
                return Err(ClientError::Configuration(format!(
                    "query parameters must be an object, got {other}"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn query_pair(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Use this token instead of the stored one
    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Override the gateway-wide timeout for this request
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn bearer_override(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    pub const fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub const fn is_retried(&self) -> bool {
        self.retried
    }

    pub fn targets_refresh_endpoint(&self) -> bool {
        self.path.trim_end_matches('/') == REFRESH_PATH.trim_end_matches('/')
    }

    /// Whether a response with `status` should trigger a token refresh
    pub fn should_refresh_on(&self, status: StatusCode) -> bool {
        status == StatusCode::UNAUTHORIZED
            && self.authenticated
            && !self.retried
            && !self.targets_refresh_endpoint()
    }

    /// Prepare the single replay allowed after a refresh
    pub fn mark_retried(&mut self, access_token: impl Into<String>) {
        self.retried = true;
        self.bearer = Some(access_token.into());
    }
}

fn query_value(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}
