// handlers/protected/payments.rs - card payments and contact requests

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::database::models::{NewPayment, Payment};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{payment_service, PaymentIntent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    /// Major currency units, e.g. 5 or 19.99
    pub price: f64,
}

/// POST /payments/intent
pub async fn create_intent(
    State(state): State<AppState>,
    Json(body): Json<IntentRequest>,
) -> ApiResult<PaymentIntent> {
    let intent = payment_service::create_intent(state.payments.as_ref(), body.price, &state.currency).await?;
    Ok(ApiResponse::success(intent))
}

/// POST /payments - record a completed card payment as a pending contact request
pub async fn record(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewPayment>,
) -> ApiResult<Payment> {
    if !body.amount.is_finite() || body.amount < 0.0 {
        return Err(ApiError::bad_request(format!("Invalid payment amount: {}", body.amount)));
    }

    let payment = state.store.insert_payment(Payment::pending(&user.email, body)).await?;
    info!("Recorded payment {} from {}", payment.transaction_id, user.email);
    Ok(ApiResponse::created(payment))
}

/// GET /payments/:email - callers may only read their own history
pub async fn list_for_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Vec<Payment>> {
    if email != user.email {
        warn!("{} attempted to read payments of {}", user.email, email);
        return Err(ApiError::forbidden("Cannot read another member's payments"));
    }
    Ok(ApiResponse::success(state.store.list_payments_for(&email).await?))
}
