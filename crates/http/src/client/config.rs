//! Fixed client settings and endpoint paths

use std::time::Duration;

/// Timeout applied to every regular request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the token refresh call, kept shorter so a stuck refresh
/// cannot hold queued requests for long
pub const REFRESH_TIMEOUT: Duration = Duration::from_secs(15);

pub const USER_AGENT: &str = concat!("aula-client/", env!("CARGO_PKG_VERSION"));

pub const LOGIN_PATH: &str = "/usuarios/login/";
pub const REFRESH_PATH: &str = "/usuarios/login/refresh/";
pub const PROFILE_PATH: &str = "/usuarios/perfil/";
pub const TOKEN_BLACKLIST_PATH: &str = "/token/blacklist/";
