//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! `auth` crate.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{AuthAppState, InMemoryUserRepository, TokenKeys, TracingOtpSender, auth_router};
use axum::{
    Router,
    http::{self, Method, header},
};
use platform::clock::SystemClock;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env().context("invalid configuration")?;
    if settings.development {
        tracing::warn!("Running in development mode: insecure cookies, OTP codes echoed");
    }

    let keys = TokenKeys::from_pem_files(
        settings.algorithm,
        &settings.private_key_path,
        &settings.public_key_path,
    )
    .context("failed to load JWT key pair")?;

    tracing::info!(algorithm = ?keys.algorithm(), "Loaded JWT key pair");

    let state = AuthAppState::new(
        InMemoryUserRepository::new(),
        TracingOtpSender::new(settings.development),
        settings.auth_config(),
        keys,
        Arc::new(SystemClock),
    );

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/v1", auth_router(state))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
