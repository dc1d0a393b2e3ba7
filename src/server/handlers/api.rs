//! JSON API endpoint handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use super::super::session::RequireAuth;
use super::super::AppState;
use crate::classifier::ModelStatus;
use crate::stats::Stats;

/// Response body for `/api/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: Stats,
    pub model: ModelStatus,
}

/// Current aggregate statistics and model status.
pub async fn api_stats(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
) -> Json<StatsResponse> {
    Json(StatsResponse {
        stats: state.pipeline.stats().snapshot(),
        model: (*state.model_status).clone(),
    })
}
