//! Registration, verification and login over the HTTP router

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{PASSWORD, spawn_app};
use serde_json::json;

const EMAIL: &str = "ada@example.com";
const PHONE: &str = "+15551234567";

#[tokio::test]
async fn register_creates_unverified_user_and_sends_otp() {
    let app = spawn_app();

    let res = app.register(EMAIL, PHONE, json!({})).await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["user"]["email"], EMAIL);
    assert_eq!(res.body["user"]["phoneNumber"], PHONE);
    assert_eq!(res.body["user"]["role"], "user");
    assert_eq!(res.body["user"]["verified"], false);
    assert!(res.body["user"].get("passwordHash").is_none());
    assert!(res.body["hash"].as_str().unwrap().contains('.'));
    let otp = res.body["otp"].as_u64().unwrap();
    assert!((10_000..=99_999).contains(&otp));
    assert!(res.set_cookies().is_empty());
    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn register_rejects_duplicates_and_invalid_input() {
    let app = spawn_app();
    assert_eq!(app.register(EMAIL, PHONE, json!({})).await.status, StatusCode::CREATED);

    let dup_email = app.register(EMAIL, "+15550000000", json!({})).await;
    assert_eq!(dup_email.status, StatusCode::CONFLICT);
    assert_eq!(dup_email.reason(), Some("USER_EXISTS"));

    let dup_phone = app.register("other@example.com", PHONE, json!({})).await;
    assert_eq!(dup_phone.status, StatusCode::CONFLICT);

    let mismatch = app
        .register("x@example.com", "+15550000001", json!({ "passwordConfirm": "Other!Pass1" }))
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.reason(), Some("VALIDATION_FAILED"));

    let weak = app
        .register(
            "y@example.com",
            "+15550000002",
            json!({ "password": "weakpass", "passwordConfirm": "weakpass" }),
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let minor = app
        .register("z@example.com", "+15550000003", json!({ "dateOfBirth": "01/01/2010" }))
        .await;
    assert_eq!(minor.status, StatusCode::BAD_REQUEST);

    let bad_phone = app.register("w@example.com", "5550000004", json!({})).await;
    assert_eq!(bad_phone.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn email_login_requires_verification_then_sets_cookies() {
    let app = spawn_app();
    let registered = app.register(EMAIL, PHONE, json!({})).await;

    let unknown = app
        .post("/auth/login/email", json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let wrong = app
        .post("/auth/login/email", json!({ "email": EMAIL, "password": "Wr0ng!Pass" }))
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
    assert_eq!(wrong.reason(), Some("INVALID_CREDENTIALS"));

    let unverified = app
        .post("/auth/login/email", json!({ "email": EMAIL, "password": PASSWORD }))
        .await;
    assert_eq!(unverified.status, StatusCode::FORBIDDEN);
    assert_eq!(unverified.reason(), Some("USER_NOT_VERIFIED"));

    let verified = app
        .verify_otp(PHONE, &registered.body["otp"], &registered.body["hash"])
        .await;
    assert_eq!(verified.status, StatusCode::OK);
    assert_eq!(verified.body["message"], "User is verified. You may login now");
    assert!(verified.set_cookies().is_empty());

    let ok = app
        .post("/auth/login/email", json!({ "email": "ADA@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let access = ok.set_cookie("access_token").unwrap();
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("Secure"));
    assert!(access.contains("SameSite=Strict"));
    assert!(access.contains("Path=/"));
    assert!(access.contains("Max-Age=900"));
    assert!(access.contains("Expires=Sat, 15 Jun 2024 12:15:00 GMT"));

    let refresh = ok.set_cookie("refresh_token").unwrap();
    assert!(refresh.contains("Max-Age=86400"));
}

#[tokio::test]
async fn phone_login_issues_tokens_for_verified_user() {
    let app = spawn_app();
    let (_, session) = app.signed_in_user(EMAIL, PHONE, json!({})).await;

    assert!(!session.access.is_empty());
    assert!(!session.refresh.is_empty());
    assert_ne!(session.access, session.refresh);

    let me = app.get("/users/me", Some(&session)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], EMAIL);
    assert_eq!(me.body["verified"], true);
}

#[tokio::test]
async fn phone_login_unknown_number_is_not_found_but_resend_is_not_checked() {
    let app = spawn_app();

    let start = app
        .post("/auth/login/phone", json!({ "phoneNumber": PHONE }))
        .await;
    assert_eq!(start.status, StatusCode::NOT_FOUND);
    assert_eq!(start.reason(), Some("USER_NOT_FOUND"));

    let resend = app
        .post("/auth/resendotp", json!({ "phoneNumber": PHONE }))
        .await;
    assert_eq!(resend.status, StatusCode::OK);
    assert_eq!(resend.body["phoneNumber"], PHONE);
    assert!(resend.body["hash"].is_string());
}

#[tokio::test]
async fn verify_otp_after_five_minutes_is_request_timeout() {
    let app = spawn_app();
    let registered = app.register(EMAIL, PHONE, json!({})).await;

    app.clock.advance(Duration::from_secs(301));
    let res = app
        .verify_otp(PHONE, &registered.body["otp"], &registered.body["hash"])
        .await;

    assert_eq!(res.status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(res.reason(), Some("OTP_EXPIRED"));
}

#[tokio::test]
async fn verify_otp_rejects_wrong_code_and_forged_hash() {
    let app = spawn_app();
    let registered = app.register(EMAIL, PHONE, json!({})).await;
    let otp = registered.body["otp"].as_u64().unwrap();
    let wrong = if otp == 99_999 { 10_000 } else { otp + 1 };

    let res = app
        .verify_otp(PHONE, &json!(wrong), &registered.body["hash"])
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.reason(), Some("OTP_MISMATCH"));

    let res = app
        .verify_otp(PHONE, &json!(otp), &json!("not-a-hash"))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    // The code is also accepted as a string
    let res = app
        .verify_otp(PHONE, &json!(otp.to_string()), &registered.body["hash"])
        .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn verify_otp_for_unknown_phone_is_not_found() {
    let app = spawn_app();
    let resend = app
        .post("/auth/resendotp", json!({ "phoneNumber": PHONE }))
        .await;

    let res = app
        .verify_otp(PHONE, &resend.body["otp"], &resend.body["hash"])
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
