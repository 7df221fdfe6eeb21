use axum::extract::State;

use crate::database::models::SuccessStory;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /success-stories - newest marriage first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<SuccessStory>> {
    Ok(ApiResponse::success(state.store.list_success_stories().await?))
}
