use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::database::models::Role;
use crate::error::ApiError;
use crate::state::AppState;

use super::auth::AuthUser;

/// Admin gate. Must run after [`super::require_token`]. The role is read from
/// the store on every request, so a demotion takes effect immediately.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let email = request
        .extensions()
        .get::<AuthUser>()
        .map(|user| user.email.clone())
        .ok_or_else(|| ApiError::unauthorized("Session token required before admin check"))?;

    let role = state.store.get_user(&email).await?.map(|u| u.role);
    if role != Some(Role::Admin) {
        warn!("Admin route {} refused for {}", request.uri().path(), email);
        return Err(ApiError::forbidden("Admin access required"));
    }

    debug!("Admin access granted to {}", email);
    Ok(next.run(request).await)
}
