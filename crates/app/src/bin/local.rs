// Curio API - Local Development Server

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use curio_artifacts::ArtifactsRepositories;
use curio_common::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curio=info,tower_http=info".into()),
        )
        .pretty()
        .init();

    info!("Starting Curio API local development server");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        mode = ?config.mode,
        session_auth = config.features.session_auth,
        discovery = config.features.discovery,
        "Configuration loaded successfully"
    );

    let pool = curio_app::connect_pool(&config).await.map_err(|e| {
        error!("Failed to connect to database: {:#}", e);
        e
    })?;

    info!("Database connection established");

    let app = curio_app::create_app(&config, ArtifactsRepositories::new(pool.clone()))
        .map_err(|e| {
            error!("Failed to create application: {}", e);
            e
        })?;

    let app = curio_app::with_middleware(app, &config.allowed_origins)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
