//! Token refresh behaviour of the API gateway

use aula_core::{ACCESS_TOKEN_KEY, MemoryStorage, REFRESH_TOKEN_KEY, SessionStorage, USER_KEY};
use aula_http::{ApiGateway, ClientError, SessionObserver};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REFRESH: &str = "/usuarios/login/refresh/";

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn access_token_refreshed(&self, access_token: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("refreshed:{access_token}"));
    }

    fn session_expired(&self) {
        self.events.lock().unwrap().push("expired".to_string());
    }
}

struct Session {
    gateway: ApiGateway,
    storage: Arc<MemoryStorage>,
    observer: Arc<RecordingObserver>,
}

fn session(server: &MockServer, access: Option<&str>, refresh: Option<&str>) -> Session {
    let storage = Arc::new(MemoryStorage::new());
    if let Some(access) = access {
        storage.set_item(ACCESS_TOKEN_KEY, access).unwrap();
    }
    if let Some(refresh) = refresh {
        storage.set_item(REFRESH_TOKEN_KEY, refresh).unwrap();
    }
    storage.set_item(USER_KEY, "{}").unwrap();

    let gateway = ApiGateway::builder()
        .base_url(server.uri())
        .storage(storage.clone())
        .build()
        .unwrap();
    let observer = Arc::new(RecordingObserver::default());
    gateway.set_session_observer(observer.clone());

    Session {
        gateway,
        storage,
        observer,
    }
}

async fn mount_protected(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/materias/"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/materias/"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_then_replay_once() {
    let server = MockServer::start().await;
    mount_protected(&server).await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .and(body_json(json!({"refresh": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "new"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    session.gateway.list_subjects().await.unwrap();

    assert_eq!(
        session.storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("new")
    );
    assert_eq!(
        session.storage.get_item(REFRESH_TOKEN_KEY).unwrap().as_deref(),
        Some("r1")
    );
    assert_eq!(session.observer.events(), vec!["refreshed:new"]);

    // Original attempt, refresh call, replay
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_rotated_refresh_token_is_stored() {
    let server = MockServer::start().await;
    mount_protected(&server).await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "new", "refresh": "r2"})),
        )
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    session.gateway.list_subjects().await.unwrap();

    assert_eq!(
        session.storage.get_item(REFRESH_TOKEN_KEY).unwrap().as_deref(),
        Some("r2")
    );
}

#[tokio::test]
async fn test_replay_rejected_again_is_not_refreshed_twice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/materias/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "new"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    let err = session.gateway.list_subjects().await.unwrap_err();
    assert!(matches!(err, ClientError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn test_refresh_rejected_ends_session() {
    let server = MockServer::start().await;
    mount_protected(&server).await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is blacklisted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    let err = session.gateway.list_subjects().await.unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(
        err.user_message(),
        "your session has expired, please log in again"
    );
    assert!(session.storage.is_empty());
    assert_eq!(session.observer.events(), vec!["expired"]);
}

#[tokio::test]
async fn test_refresh_without_access_ends_session() {
    let server = MockServer::start().await;
    mount_protected(&server).await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"refresh": "r2"})))
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    let err = session.gateway.list_subjects().await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert!(session.storage.is_empty());
}

#[tokio::test]
async fn test_missing_refresh_token_skips_network() {
    let server = MockServer::start().await;
    mount_protected(&server).await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "new"})))
        .expect(0)
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), None);
    let err = session.gateway.list_subjects().await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert!(session.storage.is_empty());
    assert_eq!(session.observer.events(), vec!["expired"]);
}

#[tokio::test]
async fn test_slow_refresh_times_out_and_ends_session() {
    let server = MockServer::start().await;
    mount_protected(&server).await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "new"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(ACCESS_TOKEN_KEY, "old").unwrap();
    storage.set_item(REFRESH_TOKEN_KEY, "r1").unwrap();
    let gateway = ApiGateway::builder()
        .base_url(server.uri())
        .storage(storage.clone())
        .refresh_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = gateway.list_subjects().await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_direct_refresh_call_never_recurses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    let err = session
        .gateway
        .refresh_access_token("r1")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AuthenticationFailed(_)));
    // A direct call reports the failure without touching the session
    assert!(session.observer.events().is_empty());
    assert_eq!(
        session.storage.get_item(REFRESH_TOKEN_KEY).unwrap().as_deref(),
        Some("r1")
    );
}

#[tokio::test]
async fn test_concurrent_rejections_share_one_refresh() {
    let server = MockServer::start().await;
    mount_protected(&server).await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "new"}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    let gateway = &session.gateway;

    let (first, second, third) = tokio::join!(
        gateway.list_subjects(),
        gateway.list_subjects(),
        gateway.list_subjects()
    );
    assert!(first.is_ok());
    assert!(second.is_ok());
    assert!(third.is_ok());

    assert_eq!(session.observer.events(), vec!["refreshed:new"]);
}

#[tokio::test]
async fn test_observer_can_be_cleared() {
    let server = MockServer::start().await;
    mount_protected(&server).await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "new"})))
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    session.gateway.clear_session_observer();
    session.gateway.list_subjects().await.unwrap();

    assert!(session.observer.events().is_empty());
}

#[tokio::test]
async fn test_rejection_after_sign_out_is_not_an_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/materias/"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "new"})))
        .expect(0)
        .mount(&server)
        .await;

    let session = session(&server, Some("old"), Some("r1"));
    let sign_out = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _guard = session.gateway.lock_session().await;
        session.storage.clear_session().unwrap();
    };

    let (result, ()) = tokio::join!(session.gateway.list_subjects(), sign_out);

    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert!(session.observer.events().is_empty());
    assert_eq!(session.storage.get_item(REFRESH_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_refresh_call_is_bounded_by_its_own_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "new"}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = ApiGateway::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .refresh_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = gateway.refresh_access_token("r1").await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout));
}
