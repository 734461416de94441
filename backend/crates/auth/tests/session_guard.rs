//! Cookie-based session handling on protected routes

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{ACCESS_TTL, REFRESH_TTL, Session, spawn_app};
use serde_json::json;

const EMAIL: &str = "grace@example.com";
const PHONE: &str = "+15557654321";

#[tokio::test]
async fn protected_routes_require_both_cookies() {
    let app = spawn_app();
    let (_, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    let none = app.get("/users/me", None).await;
    assert_eq!(none.status, StatusCode::UNAUTHORIZED);
    assert_eq!(none.reason(), Some("REFRESH_TOKEN_MISSING"));

    let access_only = Session {
        refresh: String::new(),
        ..session.clone()
    };
    let res = app.get("/users/me", Some(&access_only)).await;
    assert_eq!(res.reason(), Some("REFRESH_TOKEN_MISSING"));

    let refresh_only = Session {
        access: String::new(),
        ..session
    };
    let res = app.get("/users/me", Some(&refresh_only)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.reason(), Some("ACCESS_TOKEN_MISSING"));
}

#[tokio::test]
async fn valid_session_passes_without_new_cookie() {
    let app = spawn_app();
    let (_, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    let res = app.get("/users/me", Some(&session)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.set_cookies().is_empty());
}

#[tokio::test]
async fn expired_access_token_is_rotated_transparently() {
    let app = spawn_app();
    let (user, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    app.clock.advance(ACCESS_TTL + Duration::from_secs(1));
    let res = app.get("/users/me", Some(&session)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], user["id"]);
    let rotated = res.cookie_value("access_token").unwrap();
    assert_ne!(rotated, session.access);
    assert!(res.set_cookie("refresh_token").is_none());
    assert!(res.set_cookie("access_token").unwrap().contains("Max-Age=900"));

    let next = Session {
        access: rotated,
        ..session
    };
    let res = app.get("/users/me", Some(&next)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.set_cookies().is_empty());
}

#[tokio::test]
async fn expired_refresh_token_forces_login() {
    let app = spawn_app();
    let (_, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    app.clock.advance(REFRESH_TTL);
    let res = app.get("/users/me", Some(&session)).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.reason(), Some("REFRESH_TOKEN_EXPIRED"));
    assert_eq!(res.body["action"], "Please log in again.");
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = spawn_app();
    let (_, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    let bad_access = Session {
        access: "garbage".to_string(),
        ..session.clone()
    };
    let res = app.get("/users/me", Some(&bad_access)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.reason(), Some("ACCESS_TOKEN_INVALID"));

    let swapped = Session {
        access: session.refresh.clone(),
        refresh: session.access.clone(),
    };
    let res = app.get("/users/me", Some(&swapped)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.reason(), Some("REFRESH_TOKEN_INVALID"));
}

#[tokio::test]
async fn logout_clears_both_cookies() {
    let app = spawn_app();
    let (_, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    let res = app.get("/auth/logout", Some(&session)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "User logged out");

    for name in ["access_token", "refresh_token"] {
        let cookie = res.set_cookie(name).unwrap();
        assert!(cookie.starts_with(&format!("{name}=;")));
        assert!(cookie.contains("Max-Age=0"));
    }
    assert_eq!(res.set_cookies().len(), 2);

    let anonymous = app.get("/auth/logout", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_with_expired_access_does_not_reissue_it() {
    let app = spawn_app();
    let (_, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    app.clock.advance(ACCESS_TTL + Duration::from_secs(1));
    let res = app.get("/auth/logout", Some(&session)).await;

    assert_eq!(res.status, StatusCode::OK);
    let access_cookies: Vec<_> = res
        .set_cookies()
        .into_iter()
        .filter(|c| c.starts_with("access_token="))
        .collect();
    assert_eq!(access_cookies.len(), 1);
    assert!(access_cookies[0].contains("Max-Age=0"));
}

#[tokio::test]
async fn tokens_stay_valid_after_logout() {
    let app = spawn_app();
    let (user, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    let res = app.get("/auth/logout", Some(&session)).await;
    assert_eq!(res.status, StatusCode::OK);

    // No server-side revocation: a client that kept the cookies is still in
    let res = app.get("/users/me", Some(&session)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], user["id"]);
}
