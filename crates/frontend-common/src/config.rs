//! Frontend configuration

/// Authentication routing configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Where unauthenticated users are sent
    pub const LOGIN_ROUTE: &'static str = "/login";

    /// Landing page after login
    pub const HOME_ROUTE: &'static str = "/";

    /// Shown when the user's role may not open a page
    pub const UNAUTHORIZED_ROUTE: &'static str = "/unauthorized";
}
