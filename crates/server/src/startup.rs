use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use configs::{AppConfig, StoreBackend};
use migration::{Migrator, MigratorTrait};
use service::review::{InMemoryReviewRepository, ReviewRepository, ReviewService, SeaOrmReviewRepository};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Single-origin CORS policy; preflight requests are answered by the layer.
pub fn build_cors(origin: &str) -> Result<CorsLayer, StartupError> {
    // tower-http refuses a wildcard origin together with credentials
    if origin.trim() == "*" {
        return Err(StartupError::InvalidConfig(
            "cors.allowed_origin must name a single origin, not '*'".into(),
        ));
    }
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| StartupError::InvalidConfig(format!("cors.allowed_origin '{origin}': {e}")))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Pick and prepare the review store named by the configuration.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let repo: Arc<dyn ReviewRepository> = match cfg.store.backend {
        StoreBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
                info!("database migrations applied");
            }
            Arc::new(SeaOrmReviewRepository::new(db))
        }
        StoreBackend::Memory if cfg.store.seed_sample => Arc::new(InMemoryReviewRepository::seeded()),
        StoreBackend::Memory => Arc::new(InMemoryReviewRepository::new()),
    };
    info!(backend = ?cfg.store.backend, "review store ready");
    let svc = ReviewService::new(repo).with_timeout(Duration::from_secs(cfg.store.timeout_secs));
    Ok(AppState::new(svc))
}

pub fn build_app(state: AppState, cfg: &AppConfig) -> Result<Router, StartupError> {
    let cors = build_cors(&cfg.cors.allowed_origin)?;
    Ok(routes::build_router(state, cors))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("listen address: {e}")))
}

/// Load configuration from file and environment, then serve.
pub async fn run() -> Result<(), StartupError> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    run_with_config(cfg).await
}

/// Build the app from an already validated configuration and run the HTTP server
pub async fn run_with_config(cfg: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&cfg).await?;
    let app = build_app(state, &cfg)?;

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, origin = %cfg.cors.allowed_origin, "server running");
    axum::serve(listener, app).await?;
    Ok(())
}
