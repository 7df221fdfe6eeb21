use axum::extract::State;
use serde::Serialize;

use crate::database::models::BiodataCounts;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub users: usize,
    pub biodatas: BiodataCounts,
    pub revenue: f64,
}

/// GET /admin/stats
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let users = state.store.list_users().await?.len();
    let biodatas = state.store.count_biodata().await?;
    let revenue = state.store.total_revenue().await?;
    Ok(ApiResponse::success(DashboardStats { users, biodatas, revenue }))
}
