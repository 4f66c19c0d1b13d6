//! Tests for the RPD operations, against a mock server

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> NetworkConfig {
    let uri = url::Url::parse(&server.uri()).unwrap();
    let yaml = format!(
        "\
protocol: {}
host: {}
port: {}
login: /portal/login
logout: /portal/logout
vault: /vault/stock
check_group: /portal/users
submit_job: /portal/submit
password_update: /portal/password
",
        uri.scheme(),
        uri.host_str().unwrap(),
        uri.port().unwrap(),
    );
    NetworkConfig::from_yaml(&yaml).unwrap()
}

fn client_for(server: &MockServer) -> RpdClient {
    RpdClient::new(config_for(server)).unwrap()
}

fn session() -> Session {
    Session::new("alice", "tok-1")
}

fn html_page() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw("<html><body>It works!</body></html>", "text/html")
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_returns_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/login"))
        .and(body_string_contains("name=alice"))
        .and(body_string_contains("pwd=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .mount(&server)
        .await;

    let token = client_for(&server).login("alice", "s3cret").await.unwrap();
    assert_eq!(token, "abc123");
}

#[tokio::test]
async fn test_login_json_error_maps_to_remote() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/login"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "X", "message": "bad user", "action": "retry"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login("alice", "wrong")
        .await
        .unwrap_err();
    let Error::Remote(record) = err else {
        panic!("expected Remote");
    };
    assert_eq!(record.code, "X");
    assert_eq!(record.message, "bad user");
    assert_eq!(record.action, "retry");
}

#[tokio::test]
async fn test_login_html_page_is_unrecognized() {
    // Wrong host/port answers with an HTML page and a 200; never success
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/login"))
        .respond_with(html_page())
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login("alice", "s3cret")
        .await
        .unwrap_err();
    let Error::UnrecognizedResponse(record) = err else {
        panic!("expected UnrecognizedResponse");
    };
    assert_eq!(record.code, "Login Error:");
    assert_eq!(record.message, "Response is not valid JSON/XML");
}

#[tokio::test]
async fn test_login_truncated_json_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"token": "#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login("alice", "s3cret")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedJson { .. }));
}

#[tokio::test]
async fn test_login_token_missing_is_payload_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login("alice", "s3cret")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PayloadShape { .. }));
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_posts_user_path_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/logout/alice"))
        .and(header("token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client_for(&server).logout(&session()).await.unwrap();
}

// ============================================================================
// Group check
// ============================================================================

#[tokio::test]
async fn test_is_user_admin_array_form() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/portal/users"))
        .and(query_param("attribute", "User.Groups"))
        .and(query_param("criteria", "\"alice\""))
        .and(header("token", "tok-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"User.Groups": ["ops", "Dev"]})),
        )
        .mount(&server)
        .await;

    let admin = client_for(&server).is_user_admin(&session()).await.unwrap();
    assert!(admin);
}

#[tokio::test]
async fn test_is_user_admin_scalar_form() {
    // A user in exactly one group gets the collapsed scalar shape
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/portal/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"User.Groups": "dev"})))
        .mount(&server)
        .await;

    let admin = client_for(&server).is_user_admin(&session()).await.unwrap();
    assert!(admin);
}

#[tokio::test]
async fn test_is_user_admin_not_member() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/portal/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"User.Groups": ["ops"]})))
        .mount(&server)
        .await;

    let admin = client_for(&server).is_user_admin(&session()).await.unwrap();
    assert!(!admin);
}

// ============================================================================
// Job submission
// ============================================================================

#[tokio::test]
async fn test_submit_job_deletes_file_on_202() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/submit"))
        .and(header("token", "tok-1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("batch-001.dat");
    std::fs::write(&file, "print job contents").unwrap();

    client_for(&server)
        .submit_job(&session(), &file)
        .await
        .unwrap();
    assert!(!file.exists(), "accepted file should be deleted");
}

#[tokio::test]
async fn test_submit_job_failure_keeps_file() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/submit"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "S1", "message": "bad batch", "action": "fix and resubmit"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("batch-002.dat");
    std::fs::write(&file, "print job contents").unwrap();

    let err = client_for(&server)
        .submit_job(&session(), &file)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Remote(_)));
    assert!(file.exists(), "rejected file must stay in place");
}

#[tokio::test]
async fn test_submit_job_xml_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portal/submit"))
        .respond_with(
            ResponseTemplate::new(500).set_body_raw(
                "<error><code>S9</code><message>input device offline</message><action>wait</action></error>",
                "application/xml",
            ),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("batch-003.dat");
    std::fs::write(&file, "print job contents").unwrap();

    let err = client_for(&server)
        .submit_job(&session(), &file)
        .await
        .unwrap_err();
    let Error::Remote(record) = err else {
        panic!("expected Remote");
    };
    assert_eq!(record.code, "S9");
    assert_eq!(record.message, "input device offline");
}

#[tokio::test]
async fn test_submit_job_missing_file_is_io_error() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .submit_job(&session(), Path::new("/no/such/batch.dat"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

// ============================================================================
// Vault stock
// ============================================================================

#[tokio::test]
async fn test_vault_stock_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vault/stock"))
        .and(header("token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environments": {
                "name": "production",
                "stock": [
                    {"class": "PlainCard", "volume": 1200, "location": "A1"},
                    {"class": "Tachograph", "volume": 300, "location": "B2"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let stock = client_for(&server).vault_stock(&session()).await.unwrap();
    assert_eq!(stock.environments.len(), 1);
    assert_eq!(stock.environments[0].stock.len(), 2);
    assert_eq!(stock.environments[0].stock[1].class, "Tachograph");
}

#[tokio::test]
async fn test_vault_stock_html_fallback_is_unrecognized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vault/stock"))
        .respond_with(html_page())
        .mount(&server)
        .await;

    let err = client_for(&server)
        .vault_stock(&session())
        .await
        .unwrap_err();
    let Error::UnrecognizedResponse(record) = err else {
        panic!("expected UnrecognizedResponse");
    };
    assert_eq!(record.code, "Vault Stock Error:");
}

// ============================================================================
// Password update
// ============================================================================

#[tokio::test]
async fn test_update_password_patches_app_path() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/portal/password/DespatchApp"))
        .and(header("token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client_for(&server)
        .update_password(&session(), "DespatchApp", &json!({"pwd": "new-pass"}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_password_refused() {
    // Too similar to the previous password; service refuses with a record
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/portal/password/DespatchApp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "P1", "message": "password too similar", "action": "choose another"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update_password(&session(), "DespatchApp", &json!({"pwd": "new-pass"}))
        .await
        .unwrap_err();
    let Error::Remote(record) = err else {
        panic!("expected Remote");
    };
    assert_eq!(record.message, "password too similar");
}
