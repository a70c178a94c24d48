//! User-friendly error messages

use aula_http::ClientError;
use aula_http::client::error::INVALID_CREDENTIALS_MESSAGE;

/// Text to show for a failed API call
pub fn get_user_friendly_error(error: &ClientError) -> String {
    error.user_message()
}

/// Text to show for a failed login.
///
/// Any `401` from the login endpoint means the credentials were wrong.
pub fn login_error_message(error: &ClientError) -> String {
    match error {
        ClientError::InvalidCredentials | ClientError::AuthenticationFailed(_) => {
            INVALID_CREDENTIALS_MESSAGE.to_string()
        }
        other => get_user_friendly_error(other),
    }
}
