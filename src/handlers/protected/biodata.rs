// handlers/protected/biodata.rs - member access to the catalog

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use tracing::info;

use crate::database::models::{Biodata, BiodataFields, BiodataType};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::biodata_service;
use crate::state::AppState;

/// GET /biodatas/:id
pub async fn show(State(state): State<AppState>, Path(biodata_id): Path<i64>) -> ApiResult<Biodata> {
    let biodata = state
        .store
        .get_biodata(biodata_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Biodata {} not found", biodata_id)))?;
    Ok(ApiResponse::success(biodata))
}

/// GET /biodatas/owner/:email
pub async fn by_owner(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<Biodata> {
    let biodata = state
        .store
        .get_biodata_by_owner(&email)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No biodata owned by '{}'", email)))?;
    Ok(ApiResponse::success(biodata))
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    #[serde(rename = "type")]
    pub biodata_type: BiodataType,
    pub exclude: i64,
}

/// GET /biodatas/similar?type=Male|Female&exclude=<id>
pub async fn similar(
    State(state): State<AppState>,
    Query(query): Query<SimilarQuery>,
) -> ApiResult<Vec<Biodata>> {
    let profiles = biodata_service::similar(state.store.as_ref(), query.biodata_type, query.exclude).await?;
    Ok(ApiResponse::success(profiles))
}

/// POST /biodatas - the verified identity becomes the owner
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(fields): Json<BiodataFields>,
) -> ApiResult<Biodata> {
    let biodata = state.store.create_biodata(&user.email, fields).await?;
    info!("Created biodata {} for {}", biodata.biodata_id, user.email);
    Ok(ApiResponse::created(biodata))
}

/// PUT /biodatas/:id - overwrite every editable field
///
/// Fields missing from the body are written as empty. A biodata the caller
/// does not own is reported as absent.
pub async fn replace(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(biodata_id): Path<i64>,
    Json(fields): Json<BiodataFields>,
) -> ApiResult<Biodata> {
    let biodata = state
        .store
        .replace_biodata(biodata_id, &user.email, fields)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Biodata {} not found", biodata_id)))?;
    info!("Replaced biodata {} for {}", biodata_id, user.email);
    Ok(ApiResponse::success(biodata))
}
