// handlers/public/catalog.rs - anonymous catalog browsing

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::database::models::Biodata;
use crate::filter::{BiodataFilter, SortDirection};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::biodata_service::{self, PREMIUM_PREVIEW_LIMIT};
use crate::state::AppState;

/// GET /biodatas?type=&division=&min_age=&max_age=&sort=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<BiodataFilter>,
) -> ApiResult<Vec<Biodata>> {
    let profiles = state.store.list_biodata(&filter).await?;
    Ok(ApiResponse::success(profiles))
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub sort: SortDirection,
}

/// GET /biodatas/premium?sort=asc|desc
pub async fn premium_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Vec<Biodata>> {
    let profiles =
        biodata_service::premium_preview(state.store.as_ref(), query.sort, PREMIUM_PREVIEW_LIMIT).await?;
    Ok(ApiResponse::success(profiles))
}
