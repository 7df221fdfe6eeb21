use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{bearer_token, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated member context extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { email: claims.email }
    }
}

/// Session token gate. A request without a usable `Bearer` header is
/// rejected with 401 before any state is read; a token that fails signature
/// or expiry checks is rejected with 403.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).map_err(|e| {
        warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        ApiError::from(e)
    })?;

    let claims = state.keys.verify(token).map_err(|e| {
        warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        ApiError::from(e)
    })?;

    debug!("Session verified for {}", claims.email);
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
