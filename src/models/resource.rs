//! Bookable resources: session shifts and events

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::{ResourceStatus, Shift, UnitKind};

/// Identifies one capacity-bounded resource.
///
/// Events are staff-created rows; a session resource implicitly exists for
/// every shift of every future civil date and is never stored as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceId {
    Event { event_id: i32 },
    Session { date: NaiveDate, shift: Shift },
}

/// Snapshot of a resource as the availability engine sees it.
///
/// `booked_units` is deliberately absent: it is always recomputed from the
/// confirmed bookings so a stored counter cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookableResource {
    pub id: ResourceId,
    /// Maximum party units (people or group slots)
    pub capacity: i64,
    pub unit_kind: UnitKind,
    pub status: ResourceStatus,
    /// Civil date (WIB) the resource belongs to
    pub date: NaiveDate,
}

/// Event record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: i32,
    pub event_name: String,
    pub description: Option<String>,
    /// Civil date of the event (WIB)
    pub event_date: NaiveDate,
    pub shift: Shift,
    pub max_participants: i64,
    pub unit_kind: UnitKind,
    pub status: ResourceStatus,
    pub ticket_fee: i64,
    pub additional_notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn as_resource(&self) -> BookableResource {
        BookableResource {
            id: ResourceId::Event { event_id: self.id },
            capacity: self.max_participants,
            unit_kind: self.unit_kind,
            status: self.status,
            date: self.event_date,
        }
    }
}

/// Create event request (staff)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEvent {
    pub event_name: String,
    pub description: Option<String>,
    /// Event date (YYYY-MM-DD)
    pub event_date: String,
    pub shift: Option<i16>,
    pub max_participants: i64,
    pub unit_kind: Option<i16>,
    pub ticket_fee: Option<i64>,
    pub additional_notes: Option<String>,
}

/// Update event request (staff); capacity and closure are the mutable parts
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEvent {
    pub event_name: Option<String>,
    pub description: Option<String>,
    pub max_participants: Option<i64>,
    pub status: Option<i16>,
    pub ticket_fee: Option<i64>,
    pub additional_notes: Option<String>,
}

/// Query parameters for listing events
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EventQuery {
    /// Filter by start date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Filter by end date (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}
