//! Loan lifecycle engine
//!
//! Derives loan status and fines from stored loan facts and an explicit
//! "today", and governs the extension workflow. Extension and fine payment
//! are two-phase: a pure `request_*` step computes the proposal, and the
//! mutation is only committed once the external payment callback arrives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::models::{
    enums::LoanStatus,
    loan::{ExtensionProposal, Loan},
};

use super::{civil, DomainViolation, Rejection};

/// Default fine per civil day late, in rupiah
pub const FINE_PER_DAY: i64 = 5000;

/// Default extension length in civil days
pub const EXTENSION_DAYS: i64 = 7;

/// Default maximum number of extensions per loan
pub const MAX_EXTENSIONS: i16 = 3;

/// What happens to an accrued fine when the loan is returned.
///
/// The original system left the fine payable after return without saying so
/// anywhere; here the policy is explicit and configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FineOnReturn {
    /// The fine remains payable after return (observed behavior)
    #[default]
    CarryReceivable,
    /// Returning the items clears any accrued fine
    Waive,
}

/// Tunable loan rules; defaults match the constants above
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LoanRules {
    pub fine_per_day: i64,
    pub extension_days: i64,
    pub max_extensions: i16,
    #[serde(default)]
    pub fine_on_return: FineOnReturn,
}

impl Default for LoanRules {
    fn default() -> Self {
        Self {
            fine_per_day: FINE_PER_DAY,
            extension_days: EXTENSION_DAYS,
            max_extensions: MAX_EXTENSIONS,
            fine_on_return: FineOnReturn::CarryReceivable,
        }
    }
}

/// Current status, derived on every read.
///
/// `Overdue` is not a stored transition: it holds exactly when the loan is
/// unreturned and today's WIB date is strictly past the due date. A loan due
/// today is still Ongoing.
pub fn derive_status(loan: &Loan, today: NaiveDate) -> LoanStatus {
    if loan.returned_at.is_some() {
        LoanStatus::Returned
    } else if today > loan.loan_due {
        LoanStatus::Overdue
    } else {
        LoanStatus::Ongoing
    }
}

/// Fine accrued as of `today`, recomputed on demand rather than persisted
/// as a running balance
pub fn compute_fine(loan: &Loan, today: NaiveDate, rules: &LoanRules) -> i64 {
    if loan.returned_at.is_some() {
        return 0;
    }
    civil::days_late(today, loan.loan_due) * rules.fine_per_day
}

/// Whether an unsettled fine currently blocks extension
pub fn fine_owed(loan: &Loan, today: NaiveDate, rules: &LoanRules) -> bool {
    !loan.fine_paid && compute_fine(loan, today, rules) > 0
}

/// Phase 1 of extension: validate and compute the proposed new due date and
/// charge. Pure and idempotent; nothing is mutated until the payment
/// callback triggers [`commit_extension`].
///
/// Preconditions are checked in order, first failure wins: the extension cap,
/// then the unpaid-fine block. A fine that was already settled is never
/// charged again; `fine_charged` only carries an amount the extension payment
/// still has to cover.
pub fn request_extension(
    loan: &Loan,
    today: NaiveDate,
    rules: &LoanRules,
) -> Result<ExtensionProposal, Rejection> {
    if loan.returned_at.is_some() {
        return Err(Rejection::AlreadyReturned);
    }
    if loan.extend_count >= rules.max_extensions {
        return Err(Rejection::ExtensionLimitReached);
    }
    if fine_owed(loan, today, rules) {
        return Err(Rejection::OutstandingFine);
    }

    Ok(ExtensionProposal {
        loan_id: loan.id,
        new_due: loan.loan_due + chrono::Duration::days(rules.extension_days),
        fine_charged: if loan.fine_paid {
            0
        } else {
            compute_fine(loan, today, rules)
        },
        expected_extend_count: loan.extend_count,
        expected_due: loan.loan_due,
    })
}

/// Phase 2 of extension: apply a proposal after the payment succeeded.
///
/// Commit is conditioned on the loan still matching the state captured at
/// propose time. A duplicated or delayed payment callback therefore fails
/// the stale guard instead of incrementing twice; the caller retries the
/// whole read-modify-write cycle if the conflict was a genuine race.
pub fn commit_extension(
    loan: &Loan,
    proposal: &ExtensionProposal,
) -> Result<Loan, DomainViolation> {
    if !(0..=MAX_EXTENSIONS).contains(&loan.extend_count) {
        return Err(DomainViolation::ExtendCountOutOfRange(loan.extend_count));
    }
    if loan.extend_count != proposal.expected_extend_count
        || loan.loan_due != proposal.expected_due
    {
        return Err(DomainViolation::StaleCommit { loan_id: loan.id });
    }

    let mut updated = loan.clone();
    updated.extend_count += 1;
    updated.loan_due = proposal.new_due;
    // A surcharged fine is settled by the extension payment itself
    if proposal.fine_charged > 0 {
        updated.fine_paid = true;
        updated.fine_paid_amount = proposal.fine_charged;
    }
    Ok(updated)
}

/// Settle the currently accrued fine. Only invoked after the payment
/// callback reports success.
pub fn settle_fine(
    loan: &Loan,
    today: NaiveDate,
    rules: &LoanRules,
) -> Result<Loan, Rejection> {
    if !fine_owed(loan, today, rules) {
        return Err(Rejection::NoFineOwed);
    }

    let mut updated = loan.clone();
    updated.fine_paid = true;
    updated.fine_paid_amount = compute_fine(loan, today, rules);
    Ok(updated)
}

/// Return the loan. Permitted from any non-terminal state; what happens to
/// an accrued fine depends on the configured [`FineOnReturn`] policy.
pub fn return_loan(
    loan: &Loan,
    now: DateTime<Utc>,
    rules: &LoanRules,
) -> Result<Loan, Rejection> {
    if loan.returned_at.is_some() {
        return Err(Rejection::AlreadyReturned);
    }

    let mut updated = loan.clone();
    if rules.fine_on_return == FineOnReturn::Waive && !updated.fine_paid {
        let today = civil::civil_date(now);
        if compute_fine(loan, today, rules) > 0 {
            updated.fine_paid = true;
            updated.fine_paid_amount = 0;
        }
    }
    updated.returned_at = Some(now);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan_due(due: NaiveDate) -> Loan {
        Loan {
            id: 7,
            user_id: 42,
            book_id1: 100,
            book_id2: None,
            loan_start: due - chrono::Duration::days(14),
            loan_due: due,
            returned_at: None,
            extend_count: 0,
            fine_paid: false,
            fine_paid_amount: 0,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 18, 3, 0, 0).unwrap(),
        }
    }

    #[test]
    fn status_on_due_date_is_ongoing() {
        let due = day(2024, 6, 1);
        let loan = loan_due(due);
        assert_eq!(derive_status(&loan, due), LoanStatus::Ongoing);
    }

    #[test]
    fn status_one_day_past_due_is_overdue() {
        let due = day(2024, 6, 1);
        let loan = loan_due(due);
        assert_eq!(derive_status(&loan, day(2024, 6, 2)), LoanStatus::Overdue);
    }

    #[test]
    fn returned_wins_regardless_of_today() {
        let due = day(2024, 6, 1);
        let mut loan = loan_due(due);
        loan.returned_at = Some(Utc.with_ymd_and_hms(2024, 6, 20, 5, 0, 0).unwrap());
        assert_eq!(derive_status(&loan, day(2024, 7, 1)), LoanStatus::Returned);
        assert_eq!(derive_status(&loan, day(2024, 5, 1)), LoanStatus::Returned);
    }

    #[test]
    fn fine_is_zero_on_or_before_due() {
        let rules = LoanRules::default();
        let due = day(2024, 6, 1);
        let loan = loan_due(due);
        assert_eq!(compute_fine(&loan, due, &rules), 0);
        assert_eq!(compute_fine(&loan, day(2024, 5, 20), &rules), 0);
    }

    #[test]
    fn four_days_late_costs_twenty_thousand() {
        let rules = LoanRules::default();
        let loan = loan_due(day(2024, 6, 1));
        assert_eq!(compute_fine(&loan, day(2024, 6, 5), &rules), 20_000);
    }

    #[test]
    fn fine_is_monotone_while_unreturned() {
        let rules = LoanRules::default();
        let loan = loan_due(day(2024, 6, 1));
        let mut previous = 0;
        for offset in 0..30 {
            let today = day(2024, 6, 1) + chrono::Duration::days(offset);
            let fine = compute_fine(&loan, today, &rules);
            assert!(fine >= previous);
            previous = fine;
        }
    }

    #[test]
    fn fine_is_zero_once_returned() {
        let rules = LoanRules::default();
        let mut loan = loan_due(day(2024, 6, 1));
        loan.returned_at = Some(Utc.with_ymd_and_hms(2024, 6, 10, 5, 0, 0).unwrap());
        assert_eq!(compute_fine(&loan, day(2024, 6, 10), &rules), 0);
    }

    #[test]
    fn extension_moves_due_one_week() {
        let rules = LoanRules::default();
        let loan = loan_due(day(2024, 6, 10));
        let proposal = request_extension(&loan, day(2024, 6, 5), &rules).unwrap();
        assert_eq!(proposal.new_due, day(2024, 6, 17));
        assert_eq!(proposal.fine_charged, 0);
    }

    #[test]
    fn extension_limit_wins_over_fine_check() {
        let rules = LoanRules::default();
        let mut loan = loan_due(day(2024, 6, 1));
        loan.extend_count = 3;
        // Overdue and unpaid, but the cap is checked first
        let err = request_extension(&loan, day(2024, 6, 10), &rules).unwrap_err();
        assert_eq!(err, Rejection::ExtensionLimitReached);
        assert_eq!(err.to_string(), "extension limit reached");
    }

    #[test]
    fn unpaid_fine_blocks_extension() {
        let rules = LoanRules::default();
        let loan = loan_due(day(2024, 6, 1));
        let err = request_extension(&loan, day(2024, 6, 3), &rules).unwrap_err();
        assert_eq!(err, Rejection::OutstandingFine);
        assert_eq!(err.to_string(), "must pay outstanding fine before extending");
    }

    #[test]
    fn settled_fine_unblocks_extension() {
        let rules = LoanRules::default();
        let loan = loan_due(day(2024, 6, 1));
        let today = day(2024, 6, 3);
        let settled = settle_fine(&loan, today, &rules).unwrap();
        assert!(settled.fine_paid);
        assert_eq!(settled.fine_paid_amount, 10_000);

        let proposal = request_extension(&settled, today, &rules).unwrap();
        // Already settled, nothing more to charge
        assert_eq!(proposal.fine_charged, 0);
    }

    #[test]
    fn fourth_extension_is_rejected_after_three_commits() {
        let rules = LoanRules::default();
        let mut loan = loan_due(day(2024, 6, 10));
        let today = day(2024, 6, 1);

        for _ in 0..3 {
            let proposal = request_extension(&loan, today, &rules).unwrap();
            loan = commit_extension(&loan, &proposal).unwrap();
        }
        assert_eq!(loan.extend_count, 3);
        assert_eq!(loan.loan_due, day(2024, 7, 1));

        let err = request_extension(&loan, today, &rules).unwrap_err();
        assert_eq!(err, Rejection::ExtensionLimitReached);
    }

    #[test]
    fn duplicated_commit_hits_the_stale_guard() {
        let rules = LoanRules::default();
        let loan = loan_due(day(2024, 6, 10));
        let proposal = request_extension(&loan, day(2024, 6, 1), &rules).unwrap();

        let committed = commit_extension(&loan, &proposal).unwrap();
        // Replaying the same callback against the committed loan must fail
        let err = commit_extension(&committed, &proposal).unwrap_err();
        assert_eq!(err, DomainViolation::StaleCommit { loan_id: loan.id });
    }

    #[test]
    fn settled_fine_is_not_billed_again_on_extension() {
        let rules = LoanRules::default();
        let loan = loan_due(day(2024, 6, 1));
        let today = day(2024, 6, 4);

        // Settle the accrued 15000, then extend; the proposal must not
        // re-charge the amount that was just paid
        let settled = settle_fine(&loan, today, &rules).unwrap();
        assert_eq!(settled.fine_paid_amount, 15_000);

        let proposal = request_extension(&settled, today, &rules).unwrap();
        assert_eq!(proposal.fine_charged, 0);

        let committed = commit_extension(&settled, &proposal).unwrap();
        assert!(committed.fine_paid);
        assert_eq!(committed.fine_paid_amount, 15_000);
    }

    #[test]
    fn return_is_rejected_when_already_returned() {
        let rules = LoanRules::default();
        let mut loan = loan_due(day(2024, 6, 1));
        let now = Utc.with_ymd_and_hms(2024, 6, 2, 5, 0, 0).unwrap();
        loan = return_loan(&loan, now, &rules).unwrap();
        assert!(loan.returned_at.is_some());

        let err = return_loan(&loan, now, &rules).unwrap_err();
        assert_eq!(err, Rejection::AlreadyReturned);
    }

    #[test]
    fn carry_receivable_keeps_the_fine_payable_after_return() {
        let rules = LoanRules::default();
        let loan = loan_due(day(2024, 6, 1));
        // 2024-06-05 05:00 UTC is 12:00 WIB the same day, four days late
        let now = Utc.with_ymd_and_hms(2024, 6, 5, 5, 0, 0).unwrap();
        let returned = return_loan(&loan, now, &rules).unwrap();
        assert!(!returned.fine_paid);
    }

    #[test]
    fn waive_policy_clears_the_fine_on_return() {
        let rules = LoanRules {
            fine_on_return: FineOnReturn::Waive,
            ..LoanRules::default()
        };
        let loan = loan_due(day(2024, 6, 1));
        let now = Utc.with_ymd_and_hms(2024, 6, 5, 5, 0, 0).unwrap();
        let returned = return_loan(&loan, now, &rules).unwrap();
        assert!(returned.fine_paid);
        assert_eq!(returned.fine_paid_amount, 0);
    }

    #[test]
    fn out_of_range_extend_count_fails_loudly() {
        let mut loan = loan_due(day(2024, 6, 10));
        loan.extend_count = 5;
        let proposal = ExtensionProposal {
            loan_id: loan.id,
            new_due: day(2024, 6, 17),
            fine_charged: 0,
            expected_extend_count: 5,
            expected_due: loan.loan_due,
        };
        let err = commit_extension(&loan, &proposal).unwrap_err();
        assert_eq!(err, DomainViolation::ExtendCountOutOfRange(5));
    }
}
