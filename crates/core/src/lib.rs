//! Aula core types and utilities

pub mod academic;
pub mod storage;
#[cfg(feature = "tracing")]
pub mod tracing;
pub mod types;

pub use storage::{
    ACCESS_TOKEN_KEY, MemoryStorage, REFRESH_TOKEN_KEY, SESSION_KEYS, SessionStorage,
    StorageError, USER_KEY,
};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use types::{
    AuthResponse, Credentials, ListResponse, Page, RecordId, RefreshRequest, RefreshResponse,
    Role, User, UserDraft, UserProfile,
};
