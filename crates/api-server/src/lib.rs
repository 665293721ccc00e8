//! CredTech API server
//!
//! HTTP surface over the scoring pipeline. Wires the history store,
//! synthetic data source, and attribution engine into the orchestrator at
//! startup, seeds the demo issuers, and serves the scoring endpoints.

use attribution_engine::LinearSurrogateAttributor;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use credit_core::{Attributor, CreditError, FeatureSource, HistoryStore};
use feature_synthesis::SyntheticDataSource;
use history_store::InMemoryHistoryStore;
use scoring_orchestrator::ScoringOrchestrator;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub mod issuer_routes;
pub mod score_routes;

pub const API_VERSION: &str = "1.0.0";

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ScoringOrchestrator>,
    pub store: Arc<dyn HistoryStore>,
}

/// Handler error type; maps onto HTTP statuses
pub enum AppError {
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<CreditError> for AppError {
    fn from(err: CreditError) -> Self {
        match err {
            CreditError::NotFound(detail) => AppError::NotFound(detail),
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

#[derive(Serialize)]
struct BannerResponse {
    message: String,
    version: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: DateTime<Utc>,
    issuers_count: usize,
    scores_count: usize,
    events_count: usize,
}

async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "CredTech API is running!".to_string(),
        version: API_VERSION.to_string(),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let counts = state.store.counts().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        issuers_count: counts.issuers,
        scores_count: counts.scores,
        events_count: counts.events,
    })
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(issuer_routes::issuer_routes())
        .merge(score_routes::score_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store: Arc<dyn HistoryStore> = Arc::new(InMemoryHistoryStore::new());
    let source: Arc<dyn FeatureSource> = Arc::new(SyntheticDataSource::new());
    let attributor: Arc<dyn Attributor> = Arc::new(LinearSurrogateAttributor::new());
    let orchestrator = Arc::new(ScoringOrchestrator::new(
        store.clone(),
        source,
        attributor,
    ));

    let seeded = orchestrator.seed_demo_issuers().await?;
    if seeded > 0 {
        tracing::info!("Initialized store with {} demo issuers", seeded);
    }

    let state = AppState {
        orchestrator,
        store,
    };

    let host = std::env::var("CREDTECH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("CREDTECH_PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("CredTech API listening on {}", addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
