// handlers/public/users.rs - POST /users

use axum::{extract::State, Json};
use tracing::info;

use crate::database::models::{NewUser, UpsertOutcome, User};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /users - Record a member on first sign-in
///
/// Returns 201 with the stored user, or 409 when the email is already known.
/// The role always starts as `none`.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> ApiResult<User> {
    if body.email.trim().is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    let user = User::from(body);
    match state.store.insert_user_if_absent(user.clone()).await? {
        UpsertOutcome::Inserted => {
            info!("Registered user {}", user.email);
            Ok(ApiResponse::created(user))
        }
        UpsertOutcome::AlreadyExists => Err(ApiError::conflict(format!("User '{}' already exists", user.email))),
    }
}
