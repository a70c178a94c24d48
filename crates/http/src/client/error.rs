//! Client error types and their classification for display

use aula_core::StorageError;
use reqwest::StatusCode;
use thiserror::Error;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "incorrect username or password";
pub const SESSION_EXPIRED_MESSAGE: &str = "your session has expired, please log in again";
pub const TIMEOUT_MESSAGE: &str = "server is responding too slowly, try again later";
pub const UNREACHABLE_MESSAGE: &str = "cannot reach the server, check your connection";
pub const SERVER_ERROR_MESSAGE: &str = "server error, try again later";
pub const FALLBACK_MESSAGE: &str = "something went wrong, please try again";

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login rejected with 401
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A 401 could not be recovered by refreshing the access token
    #[error("Session expired")]
    SessionExpired,

    /// No response before the client-side timeout
    #[error("Request timed out")]
    Timeout,

    /// No response at all (DNS, connection refused, reset)
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// Server returned a 5xx status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed outside of login
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-success status
    #[error("Request rejected with {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Success status but the body lacks required data
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted session could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Request could not be built or sent for a reason other than connectivity
    #[error("Request failed: {0}")]
    Request(reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::Request(err)
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            // No status attached means no response ever arrived
            Self::Unreachable(err.to_string())
        }
    }
}

impl ClientError {
    /// Create error from HTTP status code and response body
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = server_message(body).unwrap_or_default();
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            500..=599 => Self::ServerError {
                status: status.as_u16(),
                message,
            },
            _ => Self::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status carried by the error, if the server answered
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed(_) | Self::InvalidCredentials => Some(401),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Text safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            Self::Timeout => TIMEOUT_MESSAGE.to_string(),
            Self::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            Self::ServerError { .. } => SERVER_ERROR_MESSAGE.to_string(),
            Self::AuthenticationFailed(message)
            | Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Forbidden(message)
            | Self::Rejected { message, .. }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Extract a human-readable message from an error body.
///
/// Understands `{"detail": ...}`, `{"message": ...}`,
/// `{"non_field_errors": [...]}`, a bare JSON string and plain text.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        // HTML error pages are not worth showing
        return (!body.starts_with('<')).then(|| body.to_string());
    };

    let text = match &value {
        serde_json::Value::String(text) => Some(text.as_str()),
        serde_json::Value::Object(map) => ["detail", "message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .or_else(|| {
                map.get("non_field_errors")
                    .and_then(serde_json::Value::as_array)
                    .and_then(|errors| errors.first())
                    .and_then(serde_json::Value::as_str)
            }),
        _ => None,
    };

    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, ""),
            ClientError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, "{\"detail\": \"No encontrado.\"}"),
            ClientError::NotFound(message) if message == "No encontrado."
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            ClientError::ServerError { status: 502, message } if message.is_empty()
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::CONFLICT, "duplicate entry"),
            ClientError::Rejected { status: 409, .. }
        ));
    }

    #[test]
    fn test_server_message_shapes() {
        assert_eq!(
            server_message("{\"detail\": \"Token expired\"}").as_deref(),
            Some("Token expired")
        );
        assert_eq!(
            server_message("{\"non_field_errors\": [\"Unable to log in.\"]}").as_deref(),
            Some("Unable to log in.")
        );
        assert_eq!(server_message("\"plain json string\"").as_deref(), Some("plain json string"));
        assert_eq!(server_message("Service paused").as_deref(), Some("Service paused"));
        assert_eq!(server_message("{\"code\": 12}"), None);
        assert_eq!(server_message("   "), None);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(ClientError::InvalidCredentials.user_message(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(ClientError::SessionExpired.user_message(), SESSION_EXPIRED_MESSAGE);
        assert_eq!(ClientError::Timeout.user_message(), TIMEOUT_MESSAGE);
        assert_eq!(
            ClientError::Unreachable("connection refused".into()).user_message(),
            UNREACHABLE_MESSAGE
        );
        assert_eq!(
            ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "{\"detail\": \"boom\"}")
                .user_message(),
            SERVER_ERROR_MESSAGE
        );
        assert_eq!(
            ClientError::from_status(StatusCode::FORBIDDEN, "{\"detail\": \"No tiene permiso.\"}")
                .user_message(),
            "No tiene permiso."
        );
        assert_eq!(
            ClientError::from_status(StatusCode::NOT_FOUND, "").user_message(),
            FALLBACK_MESSAGE
        );
    }
}
