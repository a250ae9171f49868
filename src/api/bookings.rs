//! Booking endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Availability, Booking, CreateBooking},
    services::reservations::BookingOutcome,
};

/// Booking created response
#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub status: String,
    pub booking: Booking,
}

/// Booking rejected response ("fully booked" / "event closed")
#[derive(Serialize, ToSchema)]
pub struct BookingRejectedResponse {
    pub status: String,
    pub decision: Availability,
}

/// Cancel request (staff)
#[derive(Deserialize, ToSchema)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

/// Create a booking.
///
/// Returns 201 when confirmed; a capacity or closure rejection comes back as
/// 422 with the availability decision, since "no slot" is an expected
/// outcome the UI must render.
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking confirmed", body = BookingResponse),
        (status = 404, description = "Resource not found"),
        (status = 422, description = "Fully booked or closed", body = BookingRejectedResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBooking>,
) -> AppResult<Response> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    match state.services.reservations.create_booking(request).await? {
        BookingOutcome::Confirmed(booking) => Ok((
            StatusCode::CREATED,
            Json(BookingResponse {
                status: "confirmed".to_string(),
                booking,
            }),
        )
            .into_response()),
        BookingOutcome::Rejected(decision) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(BookingRejectedResponse {
                status: "rejected".to_string(),
                decision,
            }),
        )
            .into_response()),
    }
}

/// List all bookings (staff view)
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "All bookings", body = Vec<Booking>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.reservations.list_bookings().await?;
    Ok(Json(bookings))
}

/// Cancel a booking (staff)
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = CancelBookingRequest,
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 409, description = "Already cancelled")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CancelBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .services
        .reservations
        .cancel_booking(id, request.reason.as_deref())
        .await?;

    Ok(Json(BookingResponse {
        status: "cancelled".to_string(),
        booking,
    }))
}
