//! Membership application endpoints (staff review)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::membership::{MembershipApplication, UpdateMembershipStatus},
};

/// List membership applications
#[utoipa::path(
    get,
    path = "/memberships",
    tag = "memberships",
    responses(
        (status = 200, description = "Applications", body = Vec<MembershipApplication>)
    )
)]
pub async fn list_memberships(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<MembershipApplication>>> {
    let applications = state.services.memberships.list().await?;
    Ok(Json(applications))
}

/// Get a membership application
#[utoipa::path(
    get,
    path = "/memberships/{id}",
    tag = "memberships",
    params(
        ("id" = i32, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application", body = MembershipApplication),
        (status = 404, description = "Application not found")
    )
)]
pub async fn get_membership(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MembershipApplication>> {
    let application = state.services.memberships.get_by_id(id).await?;
    Ok(Json(application))
}

/// Update application status (staff); transition legality is enforced
#[utoipa::path(
    put,
    path = "/memberships/{id}/status",
    tag = "memberships",
    params(
        ("id" = i32, Path, description = "Application ID")
    ),
    request_body = UpdateMembershipStatus,
    responses(
        (status = 200, description = "Status updated", body = MembershipApplication),
        (status = 404, description = "Application not found"),
        (status = 422, description = "Invalid transition")
    )
)]
pub async fn update_membership_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateMembershipStatus>,
) -> AppResult<Json<MembershipApplication>> {
    let application = state
        .services
        .memberships
        .update_status(id, &request)
        .await?;
    Ok(Json(application))
}
