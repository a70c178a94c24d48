//! Front-end building blocks shared by Aula clients: the session store,
//! route guard and user-facing error text.

pub mod auth;
pub mod config;
pub mod routes;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use auth::{AuthAction, AuthStatus, SessionState, SessionStore};
pub use config::AuthConfig;
pub use routes::{GuardDecision, NavItem, Route, guard, navigation_items};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
