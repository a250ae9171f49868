//! Loan management endpoints
//!
//! Extension is two-phase: `POST /loans/{id}/extend` only computes the
//! proposal; the due-date mutation is committed by the payment callback
//! (see the payments module).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, ExtensionProposal, LoanDetails},
    services::loans::LoanStats,
};

/// Return response with loan details
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub status: String,
    pub loan: LoanDetails,
}

/// Get a loan with derived status and fine
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan details", body = LoanDetails),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.get_loan(id).await?;
    Ok(Json(loan))
}

/// Get active loans for a user
#[utoipa::path(
    get,
    path = "/users/{id}/loans",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's active loans", body = Vec<LoanDetails>)
    )
)]
pub async fn get_user_loans(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.get_user_loans(user_id).await?;
    Ok(Json(loans))
}

/// Get borrowing history for a user
#[utoipa::path(
    get,
    path = "/users/{id}/loans/history",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's borrowing history", body = Vec<LoanDetails>)
    )
)]
pub async fn get_user_history(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.get_user_history(user_id).await?;
    Ok(Json(loans))
}

/// Create a new loan (borrow one or two books)
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = LoanDetails),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<LoanDetails>)> {
    let loan = state.services.loans.create_loan(request).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return the borrowed books
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Books returned", body = ReturnResponse),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Already returned")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    let loan = state.services.loans.return_loan(id).await?;
    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        loan,
    }))
}

/// Request an extension: returns the proposed new due date and any
/// surcharge; nothing is committed until the payment callback
#[utoipa::path(
    post,
    path = "/loans/{id}/extend",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Extension proposal", body = ExtensionProposal),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Extension limit reached or fine outstanding")
    )
)]
pub async fn request_extension(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ExtensionProposal>> {
    let proposal = state.services.loans.request_extension(id).await?;
    Ok(Json(proposal))
}

/// Active/overdue loan counts (staff dashboard)
#[utoipa::path(
    get,
    path = "/loans/stats",
    tag = "loans",
    responses(
        (status = 200, description = "Loan counts", body = LoanStats)
    )
)]
pub async fn loan_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LoanStats>> {
    let stats = state.services.loans.stats().await?;
    Ok(Json(stats))
}
