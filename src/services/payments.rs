//! Payment callback handling
//!
//! The payment provider itself is out of scope; this service only consumes
//! its callback. A succeeded payment commits the mutation that was proposed
//! before the payment started (extension, fine, booking); a failed booking
//! payment cascades into a cancellation.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::loan::{ExtensionProposal, LoanDetails},
};

use super::{loans::LoansService, reservations::ReservationsService};

/// What the payment was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPurpose {
    Extension,
    Fine,
    Booking,
}

/// Callback payload from the external payment flow
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentCallback {
    pub purpose: PaymentPurpose,
    /// "succeeded" or "failed"
    pub status: String,
    pub amount: i64,
    pub loan_id: Option<i32>,
    pub payment_id: Option<String>,
    /// The proposal returned by the extension request, echoed back so the
    /// commit can be guarded against concurrent modification
    pub proposal: Option<ExtensionProposal>,
}

/// Result of processing a callback
#[derive(Debug)]
pub enum CallbackResult {
    ExtensionCommitted(LoanDetails),
    FineSettled(LoanDetails),
    BookingConfirmed,
    BookingCancelled,
    Ignored,
}

#[derive(Clone)]
pub struct PaymentsService {
    reservations: ReservationsService,
    loans: LoansService,
}

impl PaymentsService {
    pub fn new(reservations: ReservationsService, loans: LoansService) -> Self {
        Self {
            reservations,
            loans,
        }
    }

    pub async fn handle_callback(&self, callback: PaymentCallback) -> AppResult<CallbackResult> {
        let succeeded = callback.status == "succeeded";
        tracing::info!(
            purpose = ?callback.purpose,
            succeeded,
            amount = callback.amount,
            "payment callback received"
        );

        match (callback.purpose, succeeded) {
            (PaymentPurpose::Extension, true) => {
                let proposal = callback.proposal.ok_or_else(|| {
                    AppError::BadRequest("extension callback requires the proposal".to_string())
                })?;
                let details = self.loans.commit_extension(&proposal).await?;
                Ok(CallbackResult::ExtensionCommitted(details))
            }
            (PaymentPurpose::Fine, true) => {
                let loan_id = callback.loan_id.ok_or_else(|| {
                    AppError::BadRequest("fine callback requires loan_id".to_string())
                })?;
                let details = self.loans.settle_fine(loan_id).await?;
                Ok(CallbackResult::FineSettled(details))
            }
            (PaymentPurpose::Booking, true) => Ok(CallbackResult::BookingConfirmed),
            (PaymentPurpose::Booking, false) => {
                let payment_id = callback.payment_id.ok_or_else(|| {
                    AppError::BadRequest("booking callback requires payment_id".to_string())
                })?;
                match self.reservations.cancel_by_payment(&payment_id).await? {
                    Some(_) => Ok(CallbackResult::BookingCancelled),
                    None => Ok(CallbackResult::Ignored),
                }
            }
            // A failed extension or fine payment commits nothing
            (_, false) => Ok(CallbackResult::Ignored),
        }
    }
}
