//! Score Routes
//!
//! Endpoints for the bulk refresh trigger and the full score listing.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use credit_core::{HistoryStore, ScoreRecord};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct RefreshResponse {
    pub status: String,
    pub updated_issuers: usize,
}

pub fn score_routes() -> Router<AppState> {
    Router::new()
        .route("/refresh_all", post(refresh_all))
        .route("/score_all", get(score_all))
}

/// Re-score every issuer and generate new events
async fn refresh_all(State(state): State<AppState>) -> Json<RefreshResponse> {
    let updated = state.orchestrator.refresh_all().await;
    Json(RefreshResponse {
        status: "success".to_string(),
        updated_issuers: updated,
    })
}

/// All score records across issuers
async fn score_all(State(state): State<AppState>) -> Json<Vec<ScoreRecord>> {
    Json(state.store.all_scores().await)
}
