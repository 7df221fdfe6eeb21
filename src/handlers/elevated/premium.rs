use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::database::models::{PremiumRequest, Verdict};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{Decision, PremiumService};
use crate::state::AppState;

/// GET /premium-requests - the pending queue
pub async fn list_pending(State(state): State<AppState>) -> ApiResult<Vec<PremiumRequest>> {
    let pending = PremiumService::new(state.store.as_ref()).list_pending().await?;
    Ok(ApiResponse::success(pending))
}

#[derive(Debug, Deserialize)]
pub struct DecideRequest {
    pub status: Verdict,
}

/// PATCH /premium-requests/:email  `{"status": "Approved" | "rejected"}`
pub async fn decide(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(body): Json<DecideRequest>,
) -> ApiResult<Decision> {
    let decision = PremiumService::new(state.store.as_ref()).decide(&email, body.status).await?;
    Ok(ApiResponse::success(decision))
}
