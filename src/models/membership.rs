//! Membership application model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::MembershipStatus;

/// Membership application under staff review
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MembershipApplication {
    pub id: i32,
    pub visitor_id: i32,
    pub status: MembershipStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Staff status update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMembershipStatus {
    /// Target status code
    pub status: i16,
    pub notes: Option<String>,
}
