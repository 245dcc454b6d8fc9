//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::{AuthAppState, AuthConfig, PgAuthRepository, SessionRegistry, auth_router, capture_session_token};
use axum::{
    Router, http,
    http::{Method, header},
};
use content::{ContentAppState, ContentConfig, PgContentRepository, content_router};
use platform::cookie::SameSite;
use platform::crypto;
use platform::notify::LogNotifier;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,content=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = auth_config_from_env()?;
    let cookie_name: Arc<str> = Arc::from(auth_config.session_cookie_name.as_str());

    // One registry serves both routers
    let sessions = Arc::new(SessionRegistry::new(auth_config.session_policy()));
    let _sweeper = sessions.spawn_sweeper(auth_config.sweep_interval);

    let auth_state = AuthAppState::new(
        PgAuthRepository::new(pool.clone()),
        LogNotifier,
        sessions.clone(),
        auth_config,
    )
    .context("invalid password hashing parameters")?;

    let content_state = ContentAppState::new(
        PgContentRepository::new(pool.clone()),
        sessions,
        ContentConfig::default(),
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    let app = Router::new()
        .nest("/api/auth", auth_router(auth_state))
        .nest("/api/content", content_router(content_state))
        .layer(axum::middleware::from_fn_with_state(
            cookie_name,
            capture_session_token,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = env_parse("BIND_ADDR")?.unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 31113)));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Release builds start from the hardened defaults, debug builds from
/// `AuthConfig::development()`; the environment overrides either.
fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let mut config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    if let Some(secs) = env_parse::<u64>("SESSION_IDLE_SECS")? {
        config.session_idle_timeout = Duration::from_secs(secs);
    }
    // 0 disables the absolute cap
    if let Some(secs) = env_parse::<u64>("SESSION_MAX_LIFETIME_SECS")? {
        config.session_max_lifetime = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(secure) = env_parse::<bool>("COOKIE_SECURE")? {
        config.cookie_secure = secure;
    }
    if let Ok(same_site) = env::var("COOKIE_SAME_SITE") {
        config.cookie_same_site = same_site
            .parse::<SameSite>()
            .map_err(anyhow::Error::msg)?;
    }
    if let Ok(site_url) = env::var("SITE_URL") {
        config.site_url = site_url;
    }
    if let Ok(pepper_b64) = env::var("PASSWORD_PEPPER") {
        let pepper = crypto::from_base64(pepper_b64.trim())
            .context("PASSWORD_PEPPER must be base64")?;
        config.password_pepper = Some(pepper);
    }

    Ok(config)
}

/// Parse an optional environment variable; unset is `None`, garbage is an error.
fn env_parse<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} is not valid")),
        Err(_) => Ok(None),
    }
}
