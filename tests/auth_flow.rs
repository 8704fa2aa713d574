use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use otpgate::otpgate::{
    handlers::AuthState, router, service::OpaqueId, token::SessionTokens,
    upstream::HttpAuthService,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::{net::TcpListener, sync::Arc, time::Duration};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "integration-secret";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn tokens() -> Result<SessionTokens> {
    SessionTokens::new(&SecretString::from(SECRET.to_string()))
}

fn app(upstream: &MockServer) -> Result<Router> {
    let service = HttpAuthService::new(&format!("{}/api", upstream.uri()), Duration::from_secs(5))?;
    Ok(router(Arc::new(AuthState::new(Arc::new(service), tokens()?))))
}

async fn post(app: Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await?;

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn login_then_verify_issues_session_token() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "jane@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "OTP sent to your registered email",
            "history_id": 5521
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/verify-otp"))
        .and(body_json(json!({"history_id": 5521, "otp": "804113"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "jane@example.com",
                "phone": "+15550100",
                "date_of_birth": "1990-04-01",
                "age": 36,
                "address": "1 Main St",
                "city": "Springfield",
                "state": "IL",
                "country": "US",
                "zip_code": "62701",
                "account_code": "AC1",
                "login_id": "u1"
            }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, login) = post(
        app(&upstream)?,
        "/login",
        json!({"email": "jane@example.com", "password": "hunter2"}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["success"], true);
    let history_id = login["history_id"].clone();
    assert_eq!(history_id, json!(5521));

    let (status, verified) = post(
        app(&upstream)?,
        "/verify-otp",
        json!({"history_id": history_id, "otp": "804113"}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["message"], "OTP verified successfully");
    assert_eq!(verified["user"]["full_name"], "Jane Doe");
    assert_eq!(verified["user"]["account_code"], "AC1");
    assert!(verified["user"].get("login_id").is_none());

    let token = verified["token"].as_str().context("missing token")?;
    let claims = tokens()?.verify(token)?;
    assert_eq!(claims.user_id, OpaqueId::from("u1"));
    assert_eq!(claims.account_code, Some(json!("AC1")));
    Ok(())
}

#[tokio::test]
async fn numeric_profile_values_still_issue_token() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/verify-otp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "first_name": "Jane",
                "last_name": "Doe",
                "phone": 15550100,
                "age": "36",
                "zip_code": 62701,
                "account_code": 1001,
                "login_id": 9
            }
        })))
        .mount(&upstream)
        .await;

    let (status, verified) = post(
        app(&upstream)?,
        "/verify-otp",
        json!({"history_id": "h-1", "otp": "804113"}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["user"]["zip_code"], json!(62701));
    assert_eq!(verified["user"]["phone"], json!(15550100));
    assert_eq!(verified["user"]["age"], json!("36"));
    assert_eq!(verified["user"]["account_code"], json!(1001));

    let token = verified["token"].as_str().context("missing token")?;
    let claims = tokens()?.verify(token)?;
    assert_eq!(claims.user_id, OpaqueId::from(9_u64));
    assert_eq!(claims.account_code, Some(json!(1001)));
    Ok(())
}

#[tokio::test]
async fn rejected_login_and_otp_stay_unauthorized() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid email or password"
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/verify-otp"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "OTP expired"
        })))
        .mount(&upstream)
        .await;

    let (status, body) = post(
        app(&upstream)?,
        "/login",
        json!({"email": "jane@example.com", "password": "wrong"}),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({"success": false, "message": "Invalid email or password"})
    );

    let (status, body) = post(
        app(&upstream)?,
        "/verify-otp",
        json!({"history_id": "h-1", "otp": "111111"}),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({"success": false, "message": "Invalid OTP verification result"})
    );
    Ok(())
}

#[tokio::test]
async fn upstream_outage_is_internal_error() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway: pg-primary down"))
        .mount(&upstream)
        .await;

    for (uri, body) in [
        (
            "/login",
            json!({"email": "jane@example.com", "password": "hunter2"}),
        ),
        ("/verify-otp", json!({"history_id": "h-1", "otp": "111111"})),
    ] {
        let (status, payload) = post(app(&upstream)?, uri, body).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            payload,
            json!({"success": false, "message": "Internal server error"})
        );
    }
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let upstream = MockServer::start().await;

    let response = app(&upstream)?
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let doc: Value = serde_json::from_slice(&bytes)?;
    assert!(doc["paths"].get("/login").is_some());
    assert!(doc["paths"].get("/verify-otp").is_some());
    Ok(())
}
