//! Curio application composition root
//!
//! Composes the artifact catalog router with the shared infrastructure
//! routes and middleware used by both the local server and the Lambda.

use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use curio_artifacts::ArtifactsRepositories;
use curio_auth::{AuthConfig, TokenService};
use curio_common::Config;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes
pub fn create_app(config: &Config, repos: ArtifactsRepositories) -> anyhow::Result<Router> {
    let tokens = if config.features.session_auth {
        let secret = config
            .jwt_secret
            .clone()
            .context("JWT_SECRET is required when session auth is enabled")?;
        Some(TokenService::new(AuthConfig::new(secret, config.mode)))
    } else {
        tracing::warn!("Session auth disabled; /artifacts/mine is open");
        None
    };

    let app = Router::new()
        .route("/", get(|| async { "Hello World!" }))
        .route("/health", get(health_check))
        .merge(curio_artifacts::routes(
            repos,
            tokens,
            config.features.discovery,
        ));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Credentialed CORS for the configured front-end origins
pub fn build_cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]))
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Wrap the application in the serving middleware shared by both
/// binaries: request tracing, then the body limit, then CORS.
///
/// The body limit must sit outside CORS; `Cors` needs a response body
/// with a `Default` impl, which the limited body does not have.
pub fn with_middleware(app: Router, origins: &[String]) -> anyhow::Result<Router> {
    Ok(app
        .layer(build_cors_layer(origins)?)
        .layer(body_limit_layer())
        .layer(TraceLayer::new_for_http()))
}

/// Open the Postgres pool and bring the schema up to date
pub async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("database connection failed")?;

    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("database migration failed")?;
    Ok(())
}
