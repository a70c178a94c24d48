//! Authentication module

pub mod context;
pub mod error_handler;
pub mod error_messages;
pub mod store;

pub use context::{AuthAction, AuthStatus, Session, SessionState};
pub use error_messages::{get_user_friendly_error, login_error_message};
pub use store::SessionStore;
