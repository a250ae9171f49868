//! Payment callback endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    services::payments::{CallbackResult, PaymentCallback},
};

/// Callback acknowledgement
#[derive(Serialize, ToSchema)]
pub struct CallbackResponse {
    pub result: String,
}

/// Consume a payment-provider callback.
///
/// A succeeded payment commits the pending extension or fine settlement;
/// a failed booking payment cascades into a cancellation.
#[utoipa::path(
    post,
    path = "/payments/callback",
    tag = "payments",
    request_body = PaymentCallback,
    responses(
        (status = 200, description = "Callback processed", body = CallbackResponse),
        (status = 409, description = "Stale extension commit"),
        (status = 422, description = "Business rule rejection")
    )
)]
pub async fn payment_callback(
    State(state): State<crate::AppState>,
    Json(callback): Json<PaymentCallback>,
) -> AppResult<Json<CallbackResponse>> {
    let result = state.services.payments.handle_callback(callback).await?;

    let label = match result {
        CallbackResult::ExtensionCommitted(_) => "extension_committed",
        CallbackResult::FineSettled(_) => "fine_settled",
        CallbackResult::BookingConfirmed => "booking_confirmed",
        CallbackResult::BookingCancelled => "booking_cancelled",
        CallbackResult::Ignored => "ignored",
    };

    Ok(Json(CallbackResponse {
        result: label.to_string(),
    }))
}
