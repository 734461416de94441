//! Shared harness for router-level tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::{
    Algorithm, AuthAppState, AuthConfig, InMemoryUserRepository, TokenKeys, TracingOtpSender,
    auth_router,
};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::{TimeZone, Utc};
use platform::clock::ManualClock;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ACCESS_TTL: Duration = Duration::from_secs(15 * 60);
pub const REFRESH_TTL: Duration = Duration::from_secs(24 * 3600);
pub const PASSWORD: &str = "Str0ng!Pass";

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub repo: InMemoryUserRepository,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Response {
    /// All `Set-Cookie` values
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    pub fn set_cookie(&self, name: &str) -> Option<String> {
        self.set_cookies()
            .into_iter()
            .find(|c| c.starts_with(&format!("{name}=")))
    }

    /// Value of a cookie set by this response
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        let cookie = self.set_cookie(name)?;
        let (pair, _) = cookie.split_once(';').unwrap_or((&cookie, ""));
        pair.split_once('=').map(|(_, v)| v.to_string())
    }

    pub fn reason(&self) -> Option<&str> {
        self.body.get("reason").and_then(Value::as_str)
    }
}

/// Cookie jar holding the token pair
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access: String,
    pub refresh: String,
}

impl Session {
    pub fn from_response(response: &Response) -> Self {
        Self {
            access: response.cookie_value("access_token").unwrap_or_default(),
            refresh: response.cookie_value("refresh_token").unwrap_or_default(),
        }
    }

    pub fn header(&self) -> String {
        format!("access_token={}; refresh_token={}", self.access, self.refresh)
    }
}

pub fn test_keys() -> TokenKeys {
    TokenKeys::from_pem(
        Algorithm::EdDSA,
        include_bytes!("../fixtures/ed25519_private.pem"),
        include_bytes!("../fixtures/ed25519_public.pem"),
    )
    .unwrap()
}

pub fn spawn_app() -> TestApp {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
    ));
    let repo = InMemoryUserRepository::new();
    let config = AuthConfig {
        access_token_ttl: ACCESS_TTL,
        refresh_token_ttl: REFRESH_TTL,
        otp_secret: b"integration-otp-secret".to_vec(),
        expose_otp_in_response: true,
        ..AuthConfig::default()
    };

    let state = AuthAppState::new(
        repo.clone(),
        TracingOtpSender::new(true),
        config,
        test_keys(),
        clock.clone(),
    );
    TestApp {
        router: auth_router(state),
        clock,
        repo,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Response {
            status,
            headers,
            body,
        }
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str, session: Option<&Session>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(session) = session {
            builder = builder.header(header::COOKIE, session.header());
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn register(&self, email: &str, phone: &str, extra: Value) -> Response {
        let mut body = json!({
            "name": "Ada Lovelace",
            "email": email,
            "phoneNumber": phone,
            "organization": "Acme",
            "dateOfBirth": "10/12/1990",
            "password": PASSWORD,
            "passwordConfirm": PASSWORD,
        });
        if let (Some(target), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                target.insert(k.clone(), v.clone());
            }
        }
        self.post("/auth/register", body).await
    }

    pub async fn verify_otp(&self, phone: &str, otp: &Value, hash: &Value) -> Response {
        self.post(
            "/auth/verifyotp",
            json!({ "phoneNumber": phone, "otp": otp, "hash": hash }),
        )
        .await
    }

    /// Register, verify, then sign in through the phone OTP flow
    pub async fn signed_in_user(&self, email: &str, phone: &str, extra: Value) -> (Value, Session) {
        let registered = self.register(email, phone, extra).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);
        let verified = self
            .verify_otp(phone, &registered.body["otp"], &registered.body["hash"])
            .await;
        assert_eq!(verified.status, StatusCode::OK);

        let started = self
            .post("/auth/login/phone", json!({ "phoneNumber": phone }))
            .await;
        assert_eq!(started.status, StatusCode::OK);
        let signed_in = self
            .verify_otp(phone, &started.body["otp"], &started.body["hash"])
            .await;
        assert_eq!(signed_in.status, StatusCode::OK);

        (
            registered.body["user"].clone(),
            Session::from_response(&signed_in),
        )
    }
}
