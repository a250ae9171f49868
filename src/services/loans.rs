//! Loan management service
//!
//! Orchestrates the lifecycle engine against stored loans. Status and fine
//! are derived here on every read with the injected clock; the extension and
//! fine-settlement mutations only run from the payment callback path.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    config::LoansConfig,
    domain::{civil::Clock, lifecycle},
    error::AppResult,
    models::loan::{CreateLoan, ExtensionProposal, Loan, LoanDetails},
    repository::Repository,
};

/// Active/overdue counts for the staff dashboard
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct LoanStats {
    pub active: i64,
    pub overdue: i64,
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
    clock: Arc<dyn Clock>,
}

impl LoansService {
    pub fn new(repository: Repository, config: LoansConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    fn details(&self, loan: Loan) -> LoanDetails {
        let rules = self.config.rules();
        let today = self.clock.today();
        LoanDetails {
            status: lifecycle::derive_status(&loan, today),
            fine_amount: lifecycle::compute_fine(&loan, today, &rules),
            fine_owed: lifecycle::fine_owed(&loan, today, &rules),
            loan,
        }
    }

    /// Get a loan with derived status and fine
    pub async fn get_loan(&self, id: i32) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(id).await?;
        Ok(self.details(loan))
    }

    /// Active loans for a user
    pub async fn get_user_loans(&self, user_id: i32) -> AppResult<Vec<LoanDetails>> {
        let loans = self.repository.loans.get_user_loans(user_id).await?;
        Ok(loans.into_iter().map(|l| self.details(l)).collect())
    }

    /// Full borrowing history for a user
    pub async fn get_user_history(&self, user_id: i32) -> AppResult<Vec<LoanDetails>> {
        let loans = self.repository.loans.get_user_history(user_id).await?;
        Ok(loans.into_iter().map(|l| self.details(l)).collect())
    }

    /// Create a new loan starting today (WIB)
    pub async fn create_loan(&self, loan: CreateLoan) -> AppResult<LoanDetails> {
        let start = self.clock.today();
        let due = start + chrono::Duration::days(self.config.period_days);
        let created = self.repository.loans.create(&loan, start, due).await?;
        Ok(self.details(created))
    }

    /// Phase 1 of extension: compute the proposed new due date and charge.
    /// Nothing is persisted; the proposal is returned to the payment flow.
    pub async fn request_extension(&self, id: i32) -> AppResult<ExtensionProposal> {
        let loan = self.repository.loans.get_by_id(id).await?;
        let proposal =
            lifecycle::request_extension(&loan, self.clock.today(), &self.config.rules())?;
        Ok(proposal)
    }

    /// Phase 2 of extension, invoked only after a payment-succeeded callback.
    ///
    /// The pure guard catches a stale proposal before touching the database;
    /// the UPDATE carries the same condition so a race between the read and
    /// the write still cannot double-apply.
    pub async fn commit_extension(&self, proposal: &ExtensionProposal) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(proposal.loan_id).await?;
        lifecycle::commit_extension(&loan, proposal)?;

        let updated = self.repository.loans.commit_extension(proposal).await?;
        tracing::info!(
            loan_id = updated.id,
            extend_count = updated.extend_count,
            new_due = %updated.loan_due,
            "loan extension committed"
        );
        Ok(self.details(updated))
    }

    /// Settle the accrued fine, invoked only after a payment-succeeded
    /// callback. Clears the extension block.
    pub async fn settle_fine(&self, id: i32) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(id).await?;
        let settled = lifecycle::settle_fine(&loan, self.clock.today(), &self.config.rules())?;

        let updated = self
            .repository
            .loans
            .mark_fine_paid(id, settled.fine_paid_amount)
            .await?;
        tracing::info!(loan_id = id, amount = settled.fine_paid_amount, "fine settled");
        Ok(self.details(updated))
    }

    /// Return the borrowed items
    pub async fn return_loan(&self, id: i32) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(id).await?;
        let now = Utc::now();
        let returned = lifecycle::return_loan(&loan, now, &self.config.rules())?;

        let mut updated = self.repository.loans.mark_returned(id, now).await?;
        // Waive policy clears the fine alongside the return
        if returned.fine_paid && !loan.fine_paid {
            updated = self
                .repository
                .loans
                .mark_fine_paid(id, returned.fine_paid_amount)
                .await?;
        }
        Ok(self.details(updated))
    }

    /// Active/overdue counts
    pub async fn stats(&self) -> AppResult<LoanStats> {
        let active = self.repository.loans.count_active().await?;
        let overdue = self.repository.loans.count_overdue(self.clock.today()).await?;
        Ok(LoanStats { active, overdue })
    }
}
