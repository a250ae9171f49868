//! Availability endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{booking::Availability, enums::Shift, resource::ResourceId},
};

/// Availability check request
#[derive(Deserialize, ToSchema)]
pub struct CheckAvailabilityRequest {
    pub resource: ResourceId,
    /// Requested party units (1 for an individual)
    pub party_size: Option<i64>,
}

/// Remaining slots response
#[derive(Serialize, ToSchema)]
pub struct RemainingSlotsResponse {
    pub remaining_units: i64,
}

/// Check whether a candidate booking fits the remaining capacity
#[utoipa::path(
    post,
    path = "/availability/check",
    tag = "availability",
    request_body = CheckAvailabilityRequest,
    responses(
        (status = 200, description = "Capacity decision", body = Availability),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Json(request): Json<CheckAvailabilityRequest>,
) -> AppResult<Json<Availability>> {
    let decision = state
        .services
        .reservations
        .check_availability(request.resource, request.party_size.unwrap_or(1))
        .await?;
    Ok(Json(decision))
}

/// Remaining slots for an event, for display
#[utoipa::path(
    get,
    path = "/events/{id}/remaining",
    tag = "availability",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Remaining slots", body = RemainingSlotsResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn event_remaining_slots(
    State(state): State<crate::AppState>,
    Path(event_id): Path<i32>,
) -> AppResult<Json<RemainingSlotsResponse>> {
    let remaining = state
        .services
        .reservations
        .remaining_slots(ResourceId::Event { event_id })
        .await?;
    Ok(Json(RemainingSlotsResponse {
        remaining_units: remaining,
    }))
}

/// Remaining slots for a session shift, for display ("3 slots left")
#[utoipa::path(
    get,
    path = "/sessions/{date}/{shift}/remaining",
    tag = "availability",
    params(
        ("date" = String, Path, description = "Session date (YYYY-MM-DD)"),
        ("shift" = i16, Path, description = "Shift code (0=A, 1=B, 2=C)")
    ),
    responses(
        (status = 200, description = "Remaining slots", body = RemainingSlotsResponse)
    )
)]
pub async fn session_remaining_slots(
    State(state): State<crate::AppState>,
    Path((date, shift)): Path<(NaiveDate, i16)>,
) -> AppResult<Json<RemainingSlotsResponse>> {
    let remaining = state
        .services
        .reservations
        .remaining_slots(ResourceId::Session {
            date,
            shift: Shift::from(shift),
        })
        .await?;
    Ok(Json(RemainingSlotsResponse {
        remaining_units: remaining,
    }))
}
