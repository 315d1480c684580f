//! Student Outcome Predictor - web server
//!
//! Serves the enrollment form and a small JSON API on top of the
//! inference core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  STUDENT OUTCOME PREDICTOR                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  HTML     │  │  JSON     │  │  Schema / Status        │ │
//! │  │  Form     │  │  API      │  │                         │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │     record ─► vector ─► scaler ─► model ─► arg-max ─► label │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use student_outcome_core::constants::{APP_NAME, APP_VERSION};
use student_outcome_core::Predictor;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::AppResult;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (JSON lines in production)
    let json = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "student_outcome_web=debug,student_outcome_core=info,tower_http=debug".into()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("{} v{} starting...", APP_NAME, APP_VERSION);
    tracing::info!(
        "Model: {} ({}), scaler: {}",
        config.model_path.display(),
        config.backend,
        config.scaler_path.display()
    );

    // Load artifacts once, shared read-only by every request
    let predictor = Predictor::load(&config.model_config())
        .context("Failed to load model artifacts")?;
    tracing::info!("Classes: {:?}", predictor.classes());

    let state = AppState {
        predictor: Arc::new(predictor),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Form pages
    let page_routes = Router::new()
        .route("/", get(handlers::form::show))
        .route("/predict", post(handlers::form::submit));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/schema", get(handlers::schema::schema))
        .route("/api/v1/status", get(handlers::schema::status));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
