//! Session store scenarios against a mock backend

use aula_core::{
    ACCESS_TOKEN_KEY, Credentials, MemoryStorage, REFRESH_TOKEN_KEY, Role, SessionStorage,
    USER_KEY,
};
use aula_frontend_common::{AuthStatus, SessionStore};
use aula_http::ApiGateway;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "id": 7,
        "username": "prof1",
        "email": "prof1@school.test",
        "first_name": "Ana",
        "last_name": "Rojas",
        "role": "PROFESOR"
    })
}

fn store(server: &MockServer, storage: Arc<MemoryStorage>) -> SessionStore {
    let gateway = ApiGateway::builder()
        .base_url(server.uri())
        .storage(storage)
        .build()
        .unwrap();
    SessionStore::new(gateway)
}

fn seed(storage: &MemoryStorage, access: &str, refresh: &str) {
    storage.set_item(ACCESS_TOKEN_KEY, access).unwrap();
    storage.set_item(REFRESH_TOKEN_KEY, refresh).unwrap();
    storage
        .set_item(USER_KEY, &user_json().to_string())
        .unwrap();
}

#[tokio::test]
async fn test_bootstrap_restores_without_network() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    seed(&storage, "a1", "r1");

    let store = store(&server, storage);
    let state = store.bootstrap().await;

    assert!(state.is_authenticated());
    assert_eq!(state.status, AuthStatus::Authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.current_user.unwrap().role, Role::Teacher);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bootstrap_discards_malformed_user() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(ACCESS_TOKEN_KEY, "a1").unwrap();
    storage.set_item(REFRESH_TOKEN_KEY, "r1").unwrap();
    storage.set_item(USER_KEY, "{not json").unwrap();

    let state = store(&server, storage.clone()).bootstrap().await;

    assert!(!state.is_authenticated());
    assert_eq!(state.status, AuthStatus::Anonymous);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_bootstrap_discards_partial_session() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(ACCESS_TOKEN_KEY, "a1").unwrap();

    let state = store(&server, storage.clone()).bootstrap().await;

    assert!(!state.is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_login_persists_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/usuarios/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "a1",
            "refresh": "r1",
            "user": user_json()
        })))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let store = store(&server, storage.clone());

    assert!(store.login(&Credentials::new("prof1", "secret")).await);

    let state = store.state();
    assert_eq!(state.status, AuthStatus::Authenticated);
    assert_eq!(state.access_token.as_deref(), Some("a1"));
    assert_eq!(
        storage.get_item(REFRESH_TOKEN_KEY).unwrap().as_deref(),
        Some("r1")
    );
    let stored: serde_json::Value =
        serde_json::from_str(&storage.get_item(USER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored["username"], "prof1");
}

#[tokio::test]
async fn test_wrong_password_persists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/usuarios/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "No active account"})),
        )
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let store = store(&server, storage.clone());

    assert!(!store.login(&Credentials::new("prof1", "wrong")).await);

    let state = store.state();
    assert_eq!(state.status, AuthStatus::AuthError);
    assert_eq!(
        state.last_error.as_deref(),
        Some("incorrect username or password")
    );
    assert!(!state.is_loading);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_login_without_refresh_token_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/usuarios/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "a1",
            "user": user_json()
        })))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let store = store(&server, storage.clone());

    assert!(!store.login(&Credentials::new("prof1", "secret")).await);
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_transparent_refresh_updates_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/usuarios/perfil/"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usuarios/perfil/"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "username": "prof1",
            "first_name": "Ana María",
            "last_name": "Rojas",
            "role": "PROFESOR"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/usuarios/login/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "a2"})))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    seed(&storage, "a1", "r1");
    let store = store(&server, storage.clone());
    store.bootstrap().await;

    let user = store.reload_profile().await.unwrap();
    assert_eq!(user.display_name(), "Ana María Rojas");

    let state = store.state();
    assert!(state.is_authenticated());
    assert_eq!(state.access_token.as_deref(), Some("a2"));
    assert_eq!(state.current_user.unwrap().first_name, "Ana María");
    assert_eq!(
        storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("a2")
    );
}

#[tokio::test]
async fn test_failed_refresh_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/usuarios/perfil/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/usuarios/login/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    seed(&storage, "a1", "r1");
    let store = store(&server, storage.clone());
    store.bootstrap().await;

    let err = store.reload_profile().await.unwrap_err();
    assert!(err.is_session_expired());

    let state = store.state();
    assert_eq!(state.status, AuthStatus::Anonymous);
    assert!(!state.is_authenticated());
    assert_eq!(
        state.last_error.as_deref(),
        Some("your session has expired, please log in again")
    );
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_logout_blacklists_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/blacklist/"))
        .and(body_json(json!({"refresh": "r1"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    seed(&storage, "a1", "r1");
    let store = store(&server, storage.clone());
    store.bootstrap().await;

    store.logout().await;

    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_logout_empties_storage_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/blacklist/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    seed(&storage, "a1", "r1");
    let store = store(&server, storage.clone());
    store.bootstrap().await;

    store.logout().await;

    let state = store.state();
    assert_eq!(state.status, AuthStatus::Anonymous);
    assert_eq!(state.last_error, None);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_logout_when_server_unreachable() {
    let storage = Arc::new(MemoryStorage::new());
    seed(&storage, "a1", "r1");
    let gateway = ApiGateway::builder()
        .base_url("http://127.0.0.1:1")
        .storage(storage.clone())
        .build()
        .unwrap();
    let store = SessionStore::new(gateway);
    store.bootstrap().await;

    store.logout().await;

    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_logout_during_pending_request_stays_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/usuarios/perfil/"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/usuarios/login/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "a2"})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/blacklist/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    seed(&storage, "a1", "r1");
    let store = store(&server, storage.clone());
    store.bootstrap().await;

    let sign_out = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.logout().await;
    };
    let (profile, ()) = tokio::join!(store.reload_profile(), sign_out);

    assert!(profile.unwrap_err().is_session_expired());
    let state = store.state();
    assert_eq!(state.status, AuthStatus::Anonymous);
    assert_eq!(state.last_error, None);
    assert!(storage.is_empty());
}
