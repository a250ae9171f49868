//! Availability engine
//!
//! Decides whether a candidate booking fits the remaining capacity of a
//! resource. The decision is a pure function of the resource snapshot, the
//! confirmed bookings and the requested party size; the same inputs always
//! yield the same answer.
//!
//! The decision here is advisory: availability can change between check and
//! commit, so the persistence layer re-checks capacity atomically at insert
//! time. This engine must never be the sole enforcement point.

use chrono::NaiveDate;

use crate::models::{
    booking::{Availability, Booking},
    enums::{BookingStatus, ResourceStatus},
    resource::BookableResource,
};

use super::DomainViolation;

/// Units still free on a resource, recomputed from confirmed bookings
pub fn remaining_units(resource: &BookableResource, bookings: &[Booking]) -> i64 {
    let booked: i64 = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .map(|b| b.party_size())
        .sum();
    resource.capacity - booked
}

/// Capacity decision for a candidate booking of `party_size` units.
///
/// Closure is a hard override: a closed or cancelled resource is never
/// available no matter how much capacity remains. A resource whose date has
/// passed is likewise rejected. "No slot" is an expected business outcome
/// and comes back as `available: false` with a reason, never as an error.
pub fn check_availability(
    resource: &BookableResource,
    bookings: &[Booking],
    party_size: i64,
    today: NaiveDate,
) -> Result<Availability, DomainViolation> {
    if party_size < 1 {
        return Err(DomainViolation::InvalidPartySize(party_size));
    }

    let remaining = remaining_units(resource, bookings);

    if resource.status != ResourceStatus::Open {
        return Ok(Availability {
            available: false,
            remaining_units: remaining.max(0),
            capacity: resource.capacity,
            reason: Some("event closed".to_string()),
        });
    }

    if resource.date < today {
        return Ok(Availability {
            available: false,
            remaining_units: 0,
            capacity: resource.capacity,
            reason: Some("resource expired".to_string()),
        });
    }

    if remaining >= party_size {
        Ok(Availability {
            available: true,
            remaining_units: remaining,
            capacity: resource.capacity,
            reason: None,
        })
    } else {
        Ok(Availability {
            available: false,
            remaining_units: remaining.max(0),
            capacity: resource.capacity,
            reason: Some("fully booked".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Shift, UnitKind};
    use crate::models::resource::ResourceId;
    use chrono::{NaiveDate, Utc};

    fn session_resource(capacity: i64, date: NaiveDate) -> BookableResource {
        BookableResource {
            id: ResourceId::Session { date, shift: Shift::A },
            capacity,
            unit_kind: UnitKind::PerPerson,
            status: ResourceStatus::Open,
            date,
        }
    }

    fn booking(members: &[&str], status: BookingStatus) -> Booking {
        let mut slots = members.iter().map(|m| Some(m.to_string()));
        Booking {
            id: 1,
            event_id: None,
            session_date: Some(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()),
            shift: Some(Shift::A),
            requester_name: "Rina".to_string(),
            group_member1: slots.next().flatten(),
            group_member2: slots.next().flatten(),
            group_member3: slots.next().flatten(),
            group_member4: slots.next().flatten(),
            status,
            payment_id: None,
            cancellation_reason: None,
            created_at: Utc::now(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_resource_rejects_even_a_single_seat() {
        // capacity 4, two confirmed groups of 2
        let date = day(2024, 6, 10);
        let resource = session_resource(4, date);
        let bookings = vec![
            booking(&["Budi"], BookingStatus::Confirmed),
            booking(&["Sari"], BookingStatus::Confirmed),
        ];

        let decision = check_availability(&resource, &bookings, 1, date).unwrap();
        assert!(!decision.available);
        assert_eq!(decision.remaining_units, 0);
        assert_eq!(decision.reason.as_deref(), Some("fully booked"));
    }

    #[test]
    fn cancelled_bookings_release_capacity() {
        let date = day(2024, 6, 10);
        let resource = session_resource(4, date);
        let bookings = vec![
            booking(&["Budi"], BookingStatus::Confirmed),
            booking(&["Sari"], BookingStatus::Cancelled),
        ];

        let decision = check_availability(&resource, &bookings, 2, date).unwrap();
        assert!(decision.available);
        assert_eq!(decision.remaining_units, 2);
    }

    #[test]
    fn group_larger_than_remaining_is_rejected() {
        let date = day(2024, 6, 10);
        let resource = session_resource(5, date);
        let bookings = vec![booking(&["Budi", "Sari"], BookingStatus::Confirmed)];

        // 2 units remain, group of 3 requested
        let decision = check_availability(&resource, &bookings, 3, date).unwrap();
        assert!(!decision.available);
        assert_eq!(decision.remaining_units, 2);
    }

    #[test]
    fn closed_resource_is_never_available() {
        let date = day(2024, 6, 10);
        let mut resource = session_resource(10, date);
        resource.status = ResourceStatus::Closed;

        let decision = check_availability(&resource, &[], 1, date).unwrap();
        assert!(!decision.available);
        assert_eq!(decision.reason.as_deref(), Some("event closed"));
    }

    #[test]
    fn past_date_resource_is_expired() {
        let resource = session_resource(10, day(2024, 6, 1));
        let decision = check_availability(&resource, &[], 1, day(2024, 6, 2)).unwrap();
        assert!(!decision.available);
        assert_eq!(decision.reason.as_deref(), Some("resource expired"));
    }

    #[test]
    fn booking_on_the_resource_date_itself_is_allowed() {
        let date = day(2024, 6, 10);
        let resource = session_resource(10, date);
        let decision = check_availability(&resource, &[], 1, date).unwrap();
        assert!(decision.available);
    }

    #[test]
    fn zero_party_size_is_an_invariant_violation() {
        let date = day(2024, 6, 10);
        let resource = session_resource(10, date);
        let err = check_availability(&resource, &[], 0, date).unwrap_err();
        assert_eq!(err, DomainViolation::InvalidPartySize(0));
    }

    #[test]
    fn decision_is_deterministic() {
        let date = day(2024, 6, 10);
        let resource = session_resource(6, date);
        let bookings = vec![booking(&["Budi"], BookingStatus::Confirmed)];

        let first = check_availability(&resource, &bookings, 2, date).unwrap();
        let second = check_availability(&resource, &bookings, 2, date).unwrap();
        assert_eq!(first, second);
    }
}
