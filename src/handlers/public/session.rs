// handlers/public/session.rs - POST /jwt

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: u64,
}

/// POST /jwt - Issue a session token for the signed-in identity
///
/// The identity provider has already authenticated the member in the
/// browser; this only binds the email into a short-lived token.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> ApiResult<TokenResponse> {
    let email = body.email.trim();
    if email.is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    let token = state.keys.issue(email)?;
    info!("Issued session token for {}", email);

    Ok(ApiResponse::success(TokenResponse {
        token,
        expires_in: state.keys.expires_in_secs(),
    }))
}
