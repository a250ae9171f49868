//! Loan (borrow) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::LoanStatus;

/// Loan row from the database.
///
/// Status and fine are never stored; they are derived on every read from
/// `loan_due`, `returned_at` and the current WIB date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub user_id: i32,
    pub book_id1: i32,
    pub book_id2: Option<i32>,
    /// Civil date (WIB) the loan started
    pub loan_start: NaiveDate,
    /// Civil date (WIB) the loan is due back
    pub loan_due: NaiveDate,
    pub returned_at: Option<DateTime<Utc>>,
    /// Number of extensions granted so far (0..=3)
    pub extend_count: i16,
    /// Whether the currently accrued fine has been settled
    pub fine_paid: bool,
    /// Amount settled when the fine was paid
    pub fine_paid_amount: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Loan with derived fields for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanDetails {
    #[serde(flatten)]
    pub loan: Loan,
    pub status: LoanStatus,
    /// Fine accrued as of today (WIB), zero once returned
    pub fine_amount: i64,
    /// Whether an unpaid fine currently blocks extension
    pub fine_owed: bool,
}

/// Create loan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub user_id: i32,
    pub book_id1: i32,
    pub book_id2: Option<i32>,
    pub notes: Option<String>,
}

/// Proposed extension awaiting payment confirmation.
///
/// `expected_extend_count` and `expected_due` capture the loan as seen at
/// propose time; commit is conditioned on them so a duplicated payment
/// callback cannot apply the same extension twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtensionProposal {
    pub loan_id: i32,
    pub new_due: NaiveDate,
    /// Accrued fine charged as a one-time surcharge when extending overdue
    pub fine_charged: i64,
    pub expected_extend_count: i16,
    pub expected_due: NaiveDate,
}
