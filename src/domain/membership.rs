//! Membership application state machine
//!
//! Staff-driven review flow sharing the request-under-review shape with
//! loans: transitions are explicit, terminal states stay terminal, and
//! `Revision` allows the applicant to resubmit.

use crate::models::enums::MembershipStatus;

use super::Rejection;

/// Validate a staff-driven status transition.
///
/// Terminal states are `Rejected` and `Revoked`; `Verified` only admits
/// revocation. `Revision` sends the application back to the applicant, who
/// may resubmit it as a fresh `Request`.
pub fn apply_transition(
    from: MembershipStatus,
    to: MembershipStatus,
) -> Result<MembershipStatus, Rejection> {
    use MembershipStatus::*;

    let allowed = match from {
        Request => matches!(to, Processing),
        Processing => matches!(to, Verified | Revision | Rejected),
        Revision => matches!(to, Request),
        Verified => matches!(to, Revoked),
        Rejected | Revoked => false,
    };

    if allowed {
        Ok(to)
    } else {
        Err(Rejection::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MembershipStatus::*;

    #[test]
    fn review_flow_reaches_verified() {
        let status = apply_transition(Request, Processing).unwrap();
        let status = apply_transition(status, Verified).unwrap();
        assert_eq!(status, Verified);
    }

    #[test]
    fn revision_allows_resubmission() {
        let status = apply_transition(Processing, Revision).unwrap();
        assert_eq!(apply_transition(status, Request).unwrap(), Request);
    }

    #[test]
    fn verified_can_only_be_revoked() {
        assert!(apply_transition(Verified, Revoked).is_ok());
        assert!(apply_transition(Verified, Processing).is_err());
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for to in [Request, Processing, Verified, Revision, Rejected, Revoked] {
            assert!(apply_transition(Rejected, to).is_err());
            assert!(apply_transition(Revoked, to).is_err());
        }
    }
}
