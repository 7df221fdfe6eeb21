use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::database::models::PremiumRequest;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::PremiumService;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: String,
    pub biodata_id: Option<i64>,
}

/// POST /premium-requests - 409 while one is already pending
pub async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SubmitRequest>,
) -> ApiResult<PremiumRequest> {
    let request = PremiumService::new(state.store.as_ref())
        .submit(&user.email, body.name, body.biodata_id)
        .await?;
    Ok(ApiResponse::created(request))
}
