//! Booking (reservation) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{BookingStatus, Shift};
use super::resource::ResourceId;

/// Booking row from the database.
///
/// Group members are stored in four columns matching the original schema;
/// `members()` collapses them for party-size computation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub event_id: Option<i32>,
    pub session_date: Option<NaiveDate>,
    pub shift: Option<Shift>,
    pub requester_name: String,
    pub group_member1: Option<String>,
    pub group_member2: Option<String>,
    pub group_member3: Option<String>,
    pub group_member4: Option<String>,
    pub status: BookingStatus,
    pub payment_id: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn members(&self) -> Vec<&str> {
        [
            &self.group_member1,
            &self.group_member2,
            &self.group_member3,
            &self.group_member4,
        ]
        .into_iter()
        .filter_map(|m| m.as_deref())
        .collect()
    }

    /// Capacity units this booking consumes: the requester plus any members
    pub fn party_size(&self) -> i64 {
        1 + self.members().len() as i64
    }

    pub fn resource_id(&self) -> Option<ResourceId> {
        if let Some(event_id) = self.event_id {
            return Some(ResourceId::Event { event_id });
        }
        match (self.session_date, self.shift) {
            (Some(date), Some(shift)) => Some(ResourceId::Session { date, shift }),
            _ => None,
        }
    }
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub resource: ResourceId,
    #[validate(length(min = 1, max = 100))]
    pub requester_name: String,
    /// Additional group members (absent or empty for an individual booking)
    #[validate(length(max = 4))]
    #[serde(default)]
    pub members: Vec<String>,
    pub payment_id: Option<String>,
}

impl CreateBooking {
    pub fn party_size(&self) -> i64 {
        1 + self.members.len() as i64
    }
}

/// Availability decision returned by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Availability {
    pub available: bool,
    /// Units still free before this request
    pub remaining_units: i64,
    pub capacity: i64,
    /// Human-readable cause when unavailable ("fully booked" / "event closed")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
