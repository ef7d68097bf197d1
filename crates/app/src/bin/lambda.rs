//! Curio API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tracing::info;

use curio_app::{connect_pool, create_app, with_middleware};
use curio_artifacts::ArtifactsRepositories;
use curio_common::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Curio API Lambda");

    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let pool = connect_pool(&config)
        .await
        .map_err(|e| Error::from(format!("Database error: {:#}", e)))?;

    info!("Database connection established");

    let app = create_app(&config, ArtifactsRepositories::new(pool))
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let app = with_middleware(app, &config.allowed_origins)
        .map_err(|e| Error::from(format!("CORS configuration error: {}", e)))?;

    info!("Curio API Lambda ready to serve requests");

    run(app).await
}
