mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use hotline_api::middleware::decode_token;

use common::{ADMIN_PASSWORD, TEST_SECRET, locked_app, send};

async fn login(app: &axum::Router, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "password": password })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn token_claims_describe_the_user() {
    let app = locked_app();
    let token = login(&app, ADMIN_PASSWORD).await;
    let claims = decode_token(&token, TEST_SECRET).unwrap();
    assert!(claims.is_admin);
    assert_eq!(claims.name, "Orhan");
    assert!(decode_token(&token, "some-other-secret").is_err());
}

#[tokio::test]
async fn reads_require_a_token() {
    let app = locked_app();
    let (status, body) = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Oturum geçersiz");

    let (status, _) = send(&app, Method::GET, "/api/users", None, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app, ADMIN_PASSWORD).await;
    let (status, _) = send(&app, Method::GET, "/api/users", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn signup_stays_public() {
    let app = locked_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        Some(json!({ "name": "Ali", "password": "1234" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn only_admin_changes_status() {
    let app = locked_app();
    send(
        &app,
        Method::POST,
        "/api/auth/signup",
        Some(json!({ "name": "Ali", "password": "1234" })),
        None,
    )
    .await;
    let user_token = login(&app, "1234").await;
    let admin_token = login(&app, ADMIN_PASSWORD).await;
    let busy = json!({ "status": "busy" });

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/admin/status",
        Some(busy.clone()),
        Some(&user_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Yetkisiz işlem");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/admin/status",
        Some(busy),
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "busy");

    // Reading the status only needs a valid session.
    let (status, body) = send(&app, Method::GET, "/api/admin/status", None, Some(&user_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "busy");
}
