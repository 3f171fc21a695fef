use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medinear::auth::{LoginCredentials, RegisterForm};
use medinear::config::ClientOptions;
use medinear::error::FormError;
use medinear::{Error, MediNear};
use medinear_geolocation::Coordinates;
use medinear_session::{
    FileStorage, History, MemoryStorage, Navigator, Role, SessionStorage, User,
};

fn options(server: &MockServer) -> ClientOptions {
    ClientOptions::default().with_api_url(&format!("{}/api", server.uri()))
}

// Helper to create a client that records navigation
fn setup_client(server: &MockServer) -> (MediNear, Arc<History>) {
    let history = Arc::new(History::new());
    let client = MediNear::with_parts(
        options(server),
        Arc::new(MemoryStorage::new()),
        history.clone(),
        None,
    )
    .unwrap();
    (client, history)
}

fn sign_in(client: &MediNear, role: Role) {
    client
        .session()
        .establish(
            "test-token",
            Some(User {
                id: "u1".to_string(),
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                role,
                ..Default::default()
            }),
        )
        .unwrap();
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;
    let (client, _) = setup_client(&server);
    sign_in(&client, Role::User);

    Mock::given(method("GET"))
        .and(path("/api/medical-shops"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "count": 0, "data": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let shops = client.medical_shops().all().await.unwrap();
    assert!(shops.is_empty());
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_redirects_to_login() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let history = Arc::new(History::new());

    let client = MediNear::with_parts(
        options(&server).with_session_file(&file),
        Arc::new(FileStorage::new(&file)),
        history.clone(),
        None,
    )
    .unwrap();
    sign_in(&client, Role::User);
    assert!(file.exists());

    Mock::given(method("GET"))
        .and(path("/api/hospitals"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&server)
        .await;

    let result = client.hospitals().all().await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert!(!client.session().is_authenticated());
    assert_eq!(history.current().as_deref(), Some("/login"));
    assert!(FileStorage::new(&file).load().unwrap().is_none());
}

#[tokio::test]
async fn test_register_validation_sends_nothing() {
    let server = MockServer::start().await;
    let (client, _) = setup_client(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let form = RegisterForm {
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret2".to_string(),
        ..Default::default()
    };

    let err = client.auth().register(&form).await.unwrap_err();
    assert_eq!(err, FormError::Validation("Passwords do not match".to_string()));
}

#[tokio::test]
async fn test_register_field_errors_are_reported_per_input() {
    let server = MockServer::start().await;
    let (client, _) = setup_client(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "errors": [
                {"param": "email", "msg": "Email already registered"},
                {"param": "phone", "msg": "Phone is invalid"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let form = RegisterForm {
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        ..Default::default()
    };

    let err = client.auth().register(&form).await.unwrap_err();
    assert_eq!(err.field("email"), Some("Email already registered"));
    assert_eq!(err.field("phone"), Some("Phone is invalid"));
    assert_eq!(err.banner(), None);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_login_stores_session_and_opens_dashboard() {
    let server = MockServer::start().await;
    let (client, history) = setup_client(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "asha@example.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "fresh-token",
            "user": {
                "_id": "u1",
                "name": "Asha",
                "email": "asha@example.com",
                "role": "medical_shop_owner"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .auth()
        .login(&LoginCredentials::new("asha@example.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.role, Role::MedicalShopOwner);
    assert_eq!(client.session().token().as_deref(), Some("fresh-token"));
    assert_eq!(history.current().as_deref(), Some("/dashboard"));
}

#[tokio::test]
async fn test_login_failure_shows_server_message() {
    let server = MockServer::start().await;
    let (client, _) = setup_client(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"success": false, "message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = client
        .auth()
        .login(&LoginCredentials::new("asha@example.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.banner(), Some("Invalid credentials"));

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let form = RegisterForm {
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        ..Default::default()
    };
    let err = client.auth().register(&form).await.unwrap_err();
    assert_eq!(err.banner(), Some("Registration failed"));
}

#[tokio::test]
async fn test_update_location_sends_lng_lat() {
    let server = MockServer::start().await;
    let (client, _) = setup_client(&server);
    sign_in(&client, Role::User);

    Mock::given(method("PUT"))
        .and(path("/api/auth/update-location"))
        .and(body_json(json!({"coordinates": [77.2, 28.6]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .auth()
        .update_location(Coordinates::new(77.2, 28.6))
        .await
        .unwrap();

    let location = client.session().user().and_then(|user| user.location);
    assert_eq!(
        location.and_then(|point| point.coordinates()),
        Some(Coordinates::new(77.2, 28.6))
    );
}

#[tokio::test]
async fn test_me_refreshes_cached_user() {
    let server = MockServer::start().await;
    let (client, _) = setup_client(&server);
    sign_in(&client, Role::User);

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": {
                "_id": "u1",
                "name": "Asha R",
                "email": "asha@example.com",
                "role": "user",
                "phone": "555"
            }
        })))
        .mount(&server)
        .await;

    let user = client.auth().me().await.unwrap();
    assert_eq!(user.name, "Asha R");
    assert_eq!(client.session().user().map(|u| u.name), Some("Asha R".to_string()));
    assert_eq!(client.session().token().as_deref(), Some("test-token"));
}

#[tokio::test]
async fn test_logout_goes_home() {
    let server = MockServer::start().await;
    let (client, history) = setup_client(&server);
    sign_in(&client, Role::User);

    client.auth().logout().unwrap();

    assert!(!client.session().is_authenticated());
    assert_eq!(history.current().as_deref(), Some("/"));
}

#[tokio::test]
async fn test_persist_session_requires_a_file() {
    let mut options = ClientOptions::default();
    options.persist_session = true;

    let result = MediNear::new(options);
    assert!(matches!(result, Err(Error::Config(_))));
}
