//! HTTP access to the Aula backend
//!
//! [`ApiGateway`] wraps every endpoint the clients use and owns the bearer
//! token protocol: it attaches the stored access token, refreshes it once
//! when the server answers `401`, and ends the session when that fails.

pub mod client;

pub use client::error::{ClientError, server_message};
pub use client::refresh::SessionObserver;
pub use client::request::ApiRequest;
pub use client::{ApiGateway, ApiGatewayBuilder};
