use axum::extract::{Path, State};
use serde::Serialize;

use crate::database::models::{Role, User};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users/:email
pub async fn show(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<User> {
    let user = state
        .store
        .get_user(&email)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", email)))?;
    Ok(ApiResponse::success(user))
}

#[derive(Debug, Serialize)]
pub struct AdminFlag {
    pub admin: bool,
}

#[derive(Debug, Serialize)]
pub struct PremiumFlag {
    pub premium: bool,
}

async fn has_role(state: &AppState, email: &str, role: Role) -> Result<bool, ApiError> {
    Ok(state.store.get_user(email).await?.is_some_and(|u| u.role == role))
}

/// GET /users/admin/:email - false for unknown emails
pub async fn is_admin(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<AdminFlag> {
    let admin = has_role(&state, &email, Role::Admin).await?;
    Ok(ApiResponse::success(AdminFlag { admin }))
}

/// GET /users/premium/:email - false for unknown emails
pub async fn is_premium(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<PremiumFlag> {
    let premium = has_role(&state, &email, Role::Premium).await?;
    Ok(ApiResponse::success(PremiumFlag { premium }))
}
