use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::database::models::{Favorite, NewFavorite};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /favorites
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Favorite>> {
    Ok(ApiResponse::success(state.store.list_favorites(&user.email).await?))
}

/// POST /favorites - no duplicate check
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewFavorite>,
) -> ApiResult<Favorite> {
    let favorite = state.store.add_favorite(Favorite::new(&user.email, body)).await?;
    Ok(ApiResponse::created(favorite))
}

#[derive(Debug, Serialize)]
pub struct Removed {
    pub deleted: u64,
}

/// DELETE /favorites/:biodata_id - only the caller's own entries
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(biodata_id): Path<i64>,
) -> ApiResult<Removed> {
    let deleted = state.store.remove_favorite(&user.email, biodata_id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found(format!("Biodata {} is not in your favorites", biodata_id)));
    }
    Ok(ApiResponse::success(Removed { deleted }))
}
