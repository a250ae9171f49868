//! Bookings repository
//!
//! Holds the capacity invariant at commit time: the insert re-sums confirmed
//! bookings in the same statement and refuses to insert past capacity. A
//! per-resource advisory transaction lock serializes concurrent commits, so
//! the re-sum always sees every earlier insert; under read committed alone,
//! two simultaneous inserts would each sum the same snapshot and overshoot.

use chrono::{Datelike, NaiveDate};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, CreateBooking},
        enums::Shift,
        resource::{BookableResource, ResourceId},
    },
};

/// Outcome of the conditional insert
#[derive(Debug)]
pub enum InsertOutcome {
    Inserted(Booking),
    /// The storage-level re-check found insufficient capacity
    CapacityExceeded,
}

/// Party size of a stored booking row, in SQL
const PARTY_SIZE_SQL: &str = "1 \
    + (group_member1 IS NOT NULL)::int \
    + (group_member2 IS NOT NULL)::int \
    + (group_member3 IS NOT NULL)::int \
    + (group_member4 IS NOT NULL)::int";

/// Advisory lock key for a resource; the high bits namespace events apart
/// from session shifts
fn resource_lock_key(id: &ResourceId) -> i64 {
    match id {
        ResourceId::Event { event_id } => (1 << 40) | i64::from(*event_id),
        ResourceId::Session { date, shift } => {
            (2 << 40) | (i64::from(date.num_days_from_ce()) << 2) | (*shift as i64)
        }
    }
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// List confirmed bookings for one resource
    pub async fn list_confirmed(&self, id: &ResourceId) -> AppResult<Vec<Booking>> {
        let bookings = match id {
            ResourceId::Event { event_id } => {
                sqlx::query_as::<_, Booking>(
                    "SELECT * FROM bookings WHERE event_id = $1 AND status = 0 ORDER BY created_at",
                )
                .bind(event_id)
                .fetch_all(&self.pool)
                .await?
            }
            ResourceId::Session { date, shift } => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    SELECT * FROM bookings
                    WHERE event_id IS NULL AND session_date = $1 AND shift = $2 AND status = 0
                    ORDER BY created_at
                    "#,
                )
                .bind(date)
                .bind(shift)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(bookings)
    }

    /// List all bookings, newest first (staff view)
    pub async fn list_all(&self) -> AppResult<Vec<Booking>> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(bookings)
    }

    /// Insert a booking only if capacity allows, atomically.
    ///
    /// The availability pre-check is advisory; this statement is the
    /// enforcement point for `sum(party_size) <= capacity`.
    pub async fn insert_if_capacity_allows(
        &self,
        resource: &BookableResource,
        data: &CreateBooking,
    ) -> AppResult<InsertOutcome> {
        let (event_id, session_date, shift): (Option<i32>, Option<NaiveDate>, Option<Shift>) =
            match resource.id {
                ResourceId::Event { event_id } => (Some(event_id), None, None),
                ResourceId::Session { date, shift } => (None, Some(date), Some(shift)),
            };

        let mut members = data.members.iter().map(|m| Some(m.as_str()));
        // $1 party size, $2 capacity, then the row values; the inner sum
        // reuses the row's resource binds
        let sql = format!(
            r#"
            INSERT INTO bookings (
                event_id, session_date, shift, requester_name,
                group_member1, group_member2, group_member3, group_member4,
                status, payment_id
            )
            SELECT $3, $4, $5, $6, $7, $8, $9, $10, 0, $11
            WHERE $1::bigint <= $2::bigint - COALESCE((
                SELECT SUM({party_size})
                FROM bookings
                WHERE status = 0 AND ({predicate})
            ), 0)
            RETURNING *
            "#,
            party_size = PARTY_SIZE_SQL,
            predicate = match resource.id {
                ResourceId::Event { .. } => "event_id = $3",
                ResourceId::Session { .. } =>
                    "event_id IS NULL AND session_date = $4 AND shift = $5",
            },
        );

        let mut tx = self.pool.begin().await?;

        // Serialize commits per resource; released at commit/rollback
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(resource_lock_key(&resource.id))
            .execute(&mut *tx)
            .await?;

        let inserted = sqlx::query_as::<_, Booking>(&sql)
            .bind(data.party_size())
            .bind(resource.capacity)
            .bind(event_id)
            .bind(session_date)
            .bind(shift)
            .bind(&data.requester_name)
            .bind(members.next().flatten())
            .bind(members.next().flatten())
            .bind(members.next().flatten())
            .bind(members.next().flatten())
            .bind(&data.payment_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        match inserted {
            Some(booking) => Ok(InsertOutcome::Inserted(booking)),
            None => Ok(InsertOutcome::CapacityExceeded),
        }
    }

    /// Cancel a booking (staff action or payment-failure cascade)
    pub async fn cancel(&self, id: i32, reason: Option<&str>) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 1, cancellation_reason = $1
            WHERE id = $2 AND status = 0
            RETURNING *
            "#,
        )
        .bind(reason)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!("Booking {} not found or already cancelled", id))
        })
    }

    /// Cancel the booking attached to a failed payment
    pub async fn cancel_by_payment(&self, payment_id: &str) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 1, cancellation_reason = 'payment failed'
            WHERE payment_id = $1 AND status = 0
            RETURNING *
            "#,
        )
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lock_keys_are_stable_and_distinct_per_resource() {
        let date = day(2024, 6, 10);
        let session_a = ResourceId::Session { date, shift: Shift::A };
        let session_b = ResourceId::Session { date, shift: Shift::B };
        let next_day = ResourceId::Session {
            date: day(2024, 6, 11),
            shift: Shift::A,
        };
        let event = ResourceId::Event { event_id: 1 };

        assert_eq!(resource_lock_key(&session_a), resource_lock_key(&session_a));
        assert_ne!(resource_lock_key(&session_a), resource_lock_key(&session_b));
        assert_ne!(resource_lock_key(&session_a), resource_lock_key(&next_day));
        assert_ne!(resource_lock_key(&session_a), resource_lock_key(&event));
        assert_ne!(resource_lock_key(&event), resource_lock_key(&ResourceId::Event { event_id: 2 }));
    }
}
