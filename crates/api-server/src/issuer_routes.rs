//! Issuer Routes
//!
//! Endpoints for listing issuers with their latest scores, comparing an
//! issuer's agency rating against the model score, and fetching issuer
//! details with recent events.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use credit_core::{BaselineRating, EventRecord, HistoryStore, Issuer, Outlook, ScoreRecord};
use history_store::DEFAULT_RECENT_EVENTS;
use serde::Serialize;

use crate::{AppError, AppState};

/// An issuer joined with its latest score, if any
#[derive(Serialize)]
pub struct IssuerWithScore {
    #[serde(flatten)]
    pub issuer: Issuer,
    pub score: Option<i32>,
    pub outlook: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Agency rating vs model score for one issuer
#[derive(Serialize)]
pub struct CompareResponse {
    pub issuer_id: String,
    pub issuer_name: String,
    pub baseline_rating: BaselineRating,
    pub model_score: i32,
    pub outlook: Outlook,
}

/// Full detail view: issuer, latest score, recent events
#[derive(Serialize)]
pub struct IssuerDetailsResponse {
    pub issuer: Issuer,
    pub score: Option<ScoreRecord>,
    pub events: Vec<EventRecord>,
}

pub fn issuer_routes() -> Router<AppState> {
    Router::new()
        .route("/issuers", get(list_issuers))
        .route("/compare/:issuer_id", get(compare))
        .route("/issuer/:issuer_id/details", get(issuer_details))
}

/// All issuers with their latest scores
async fn list_issuers(State(state): State<AppState>) -> Json<Vec<IssuerWithScore>> {
    let issuers = state.store.list_issuers().await;
    let mut result = Vec::with_capacity(issuers.len());

    for issuer in issuers {
        let latest = state.store.latest_score(&issuer.id).await;
        result.push(match latest {
            Some(score) => IssuerWithScore {
                issuer,
                score: Some(score.score),
                outlook: score.outlook.as_str().to_string(),
                timestamp: Some(score.timestamp),
            },
            None => IssuerWithScore {
                issuer,
                score: None,
                outlook: "Unknown".to_string(),
                timestamp: None,
            },
        });
    }

    Json(result)
}

/// Compare agency rating vs model score for an issuer
async fn compare(
    State(state): State<AppState>,
    Path(issuer_id): Path<String>,
) -> Result<Json<CompareResponse>, AppError> {
    let issuer = state
        .store
        .get_issuer(&issuer_id)
        .await
        .ok_or_else(|| AppError::NotFound("Issuer not found".to_string()))?;

    let latest = state
        .store
        .latest_score(&issuer_id)
        .await
        .ok_or_else(|| AppError::NotFound("No score found for this issuer".to_string()))?;

    Ok(Json(CompareResponse {
        issuer_id,
        issuer_name: issuer.name,
        baseline_rating: issuer.baseline_rating,
        model_score: latest.score,
        outlook: latest.outlook,
    }))
}

/// Detailed view for a specific issuer
async fn issuer_details(
    State(state): State<AppState>,
    Path(issuer_id): Path<String>,
) -> Result<Json<IssuerDetailsResponse>, AppError> {
    let issuer = state
        .store
        .get_issuer(&issuer_id)
        .await
        .ok_or_else(|| AppError::NotFound("Issuer not found".to_string()))?;

    let score = state.store.latest_score(&issuer_id).await;
    let events = state
        .store
        .recent_events(&issuer_id, DEFAULT_RECENT_EVENTS)
        .await;

    Ok(Json(IssuerDetailsResponse {
        issuer,
        score,
        events,
    }))
}
