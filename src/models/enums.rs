//! Shared domain enums (stored as smallint codes)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Shift
// ---------------------------------------------------------------------------

/// Reading-session shifts; every future civil date carries all three
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[repr(i16)]
pub enum Shift {
    A = 0,
    B = 1,
    C = 2,
}

impl Shift {
    /// Opening and closing times, WIB
    pub fn hours(&self) -> (&'static str, &'static str) {
        match self {
            Shift::A => ("10:00", "14:00"),
            Shift::B => ("14:00", "18:00"),
            Shift::C => ("18:00", "22:00"),
        }
    }
}

impl From<i16> for Shift {
    fn from(v: i16) -> Self {
        match v {
            1 => Shift::B,
            2 => Shift::C,
            _ => Shift::A,
        }
    }
}

impl From<Shift> for i16 {
    fn from(s: Shift) -> Self {
        s as i16
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Shift::A => "Shift A",
            Shift::B => "Shift B",
            Shift::C => "Shift C",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ResourceStatus
// ---------------------------------------------------------------------------

/// Bookable resource status; closure is a hard override on availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[repr(i16)]
pub enum ResourceStatus {
    Open = 0,
    Closed = 1,
    Cancelled = 2,
}

impl From<i16> for ResourceStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => ResourceStatus::Closed,
            2 => ResourceStatus::Cancelled,
            _ => ResourceStatus::Open,
        }
    }
}

impl From<ResourceStatus> for i16 {
    fn from(s: ResourceStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResourceStatus::Open => "Open",
            ResourceStatus::Closed => "Closed",
            ResourceStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// UnitKind
// ---------------------------------------------------------------------------

/// What one capacity unit means for a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[repr(i16)]
pub enum UnitKind {
    PerPerson = 0,
    PerGroup = 1,
}

impl From<i16> for UnitKind {
    fn from(v: i16) -> Self {
        match v {
            1 => UnitKind::PerGroup,
            _ => UnitKind::PerPerson,
        }
    }
}

impl From<UnitKind> for i16 {
    fn from(u: UnitKind) -> Self {
        u as i16
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking status; Confirmed bookings are immutable except cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[repr(i16)]
pub enum BookingStatus {
    Confirmed = 0,
    Cancelled = 1,
}

impl From<i16> for BookingStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => BookingStatus::Cancelled,
            _ => BookingStatus::Confirmed,
        }
    }
}

impl From<BookingStatus> for i16 {
    fn from(s: BookingStatus) -> Self {
        s as i16
    }
}

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Derived loan status; never stored, always recomputed against "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    Ongoing,
    Overdue,
    Returned,
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Ongoing => "On Going",
            LoanStatus::Overdue => "Overdue",
            LoanStatus::Returned => "Returned",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// MembershipStatus
// ---------------------------------------------------------------------------

/// Membership application review states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[repr(i16)]
pub enum MembershipStatus {
    Request = 0,
    Processing = 1,
    Verified = 2,
    Revision = 3,
    Rejected = 4,
    Revoked = 5,
}

impl From<i16> for MembershipStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => MembershipStatus::Processing,
            2 => MembershipStatus::Verified,
            3 => MembershipStatus::Revision,
            4 => MembershipStatus::Rejected,
            5 => MembershipStatus::Revoked,
            _ => MembershipStatus::Request,
        }
    }
}

impl From<MembershipStatus> for i16 {
    fn from(s: MembershipStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MembershipStatus::Request => "request",
            MembershipStatus::Processing => "processing",
            MembershipStatus::Verified => "verified",
            MembershipStatus::Revision => "revision",
            MembershipStatus::Rejected => "rejected",
            MembershipStatus::Revoked => "revoked",
        };
        write!(f, "{}", label)
    }
}
