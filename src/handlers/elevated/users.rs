use axum::extract::{Path, State};
use serde::Serialize;
use tracing::info;

use crate::database::models::{Role, User};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{Decision, PremiumService};
use crate::state::AppState;

/// GET /users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.store.list_users().await?))
}

#[derive(Debug, Serialize)]
pub struct RoleChange {
    pub email: String,
    pub role: Role,
}

/// PATCH /users/admin/:email - unconditional overwrite
pub async fn make_admin(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<RoleChange> {
    if !state.store.set_role(&email, Role::Admin).await? {
        return Err(ApiError::not_found(format!("User '{}' not found", email)));
    }
    info!("Granted admin role to {}", email);
    Ok(ApiResponse::success(RoleChange { email, role: Role::Admin }))
}

/// PATCH /users/premium/:email - promote without waiting for a request
pub async fn make_premium(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<Decision> {
    let decision = PremiumService::new(state.store.as_ref()).grant_premium(&email).await?;
    Ok(ApiResponse::success(decision))
}
