//! Event management endpoints (staff)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::resource::{CreateEvent, Event, EventQuery, UpdateEvent},
};

/// Paginated events response
#[derive(Serialize, ToSchema)]
pub struct EventListResponse {
    pub events: Vec<Event>,
    pub total: i64,
}

/// List events
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(EventQuery),
    responses(
        (status = 200, description = "Events", body = EventListResponse)
    )
)]
pub async fn list_events(
    State(state): State<crate::AppState>,
    Query(query): Query<EventQuery>,
) -> AppResult<Json<EventListResponse>> {
    let (events, total) = state.services.reservations.list_events(&query).await?;
    Ok(Json(EventListResponse { events, total }))
}

/// Get event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Event>> {
    let event = state.services.reservations.get_event(id).await?;
    Ok(Json(event))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_event(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state.services.reservations.create_event(&request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update an event; setting status closes or reopens it
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    let event = state.services.reservations.update_event(id, &request).await?;
    Ok(Json(event))
}
