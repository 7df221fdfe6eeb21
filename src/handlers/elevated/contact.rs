// handlers/elevated/contact.rs - contact requests are payment records awaiting approval

use axum::extract::{Path, State};
use serde::Serialize;
use tracing::info;

use crate::database::models::{Payment, PaymentStatus};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /contact-requests
pub async fn list_pending(State(state): State<AppState>) -> ApiResult<Vec<Payment>> {
    let pending = state.store.list_payments_by_status(PaymentStatus::Pending).await?;
    Ok(ApiResponse::success(pending))
}

#[derive(Debug, Serialize)]
pub struct Approval {
    pub email: String,
    pub approved: u64,
}

/// PATCH /contact-requests/:email - approve every payment the member made
pub async fn approve(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<Approval> {
    let approved = state.store.approve_payments(&email).await?;
    if approved == 0 {
        return Err(ApiError::not_found(format!("No contact requests from '{}'", email)));
    }
    info!("Approved {} contact request(s) from {}", approved, email);
    Ok(ApiResponse::success(Approval { email, approved }))
}
