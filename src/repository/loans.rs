//! Loans repository
//!
//! The extension commit is guarded by optimistic concurrency on
//! `extend_count` and `loan_due`: the UPDATE only applies when the row still
//! matches the values captured at propose time, so a duplicated payment
//! callback updates zero rows instead of double-applying.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    domain::DomainViolation,
    error::{AppError, AppResult},
    models::loan::{CreateLoan, ExtensionProposal, Loan},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))
    }

    /// Get active (unreturned) loans for a user
    pub async fn get_user_loans(&self, user_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE user_id = $1 AND returned_at IS NULL ORDER BY loan_due",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Full borrowing history for a user, loans are never deleted
    pub async fn get_user_history(&self, user_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Create a new loan
    pub async fn create(
        &self,
        loan: &CreateLoan,
        loan_start: NaiveDate,
        loan_due: NaiveDate,
    ) -> AppResult<Loan> {
        let created = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (
                user_id, book_id1, book_id2, loan_start, loan_due,
                extend_count, fine_paid, fine_paid_amount, notes
            )
            VALUES ($1, $2, $3, $4, $5, 0, false, 0, $6)
            RETURNING *
            "#,
        )
        .bind(loan.user_id)
        .bind(loan.book_id1)
        .bind(loan.book_id2)
        .bind(loan_start)
        .bind(loan_due)
        .bind(&loan.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a confirmed extension under the optimistic guard.
    ///
    /// Zero rows affected means the loan no longer matches the proposal;
    /// that is surfaced as a stale-commit violation and the caller must
    /// restart from a fresh read.
    pub async fn commit_extension(&self, proposal: &ExtensionProposal) -> AppResult<Loan> {
        let updated = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET loan_due = $1,
                extend_count = extend_count + 1,
                fine_paid = CASE WHEN $2::bigint > 0 THEN true ELSE fine_paid END,
                fine_paid_amount = CASE WHEN $2::bigint > 0 THEN $2 ELSE fine_paid_amount END
            WHERE id = $3
              AND returned_at IS NULL
              AND extend_count = $4
              AND loan_due = $5
            RETURNING *
            "#,
        )
        .bind(proposal.new_due)
        .bind(proposal.fine_charged)
        .bind(proposal.loan_id)
        .bind(proposal.expected_extend_count)
        .bind(proposal.expected_due)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| {
            AppError::Violation(DomainViolation::StaleCommit {
                loan_id: proposal.loan_id,
            })
        })
    }

    /// Record the return timestamp; refuses a second return
    pub async fn mark_returned(&self, id: i32, returned_at: DateTime<Utc>) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET returned_at = $1
            WHERE id = $2 AND returned_at IS NULL
            RETURNING *
            "#,
        )
        .bind(returned_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Loan {} not found or already returned", id)))
    }

    /// Record a settled fine
    pub async fn mark_fine_paid(&self, id: i32, amount: i64) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET fine_paid = true, fine_paid_amount = $1
            WHERE id = $2 AND fine_paid = false
            RETURNING *
            "#,
        )
        .bind(amount)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Loan {} fine already settled", id)))
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE returned_at IS NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count overdue loans against a civil date
    pub async fn count_overdue(&self, today: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE returned_at IS NULL AND loan_due < $1",
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
