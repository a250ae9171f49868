//! Resources repository: events and implicit session shifts

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{ResourceStatus, UnitKind},
        resource::{BookableResource, CreateEvent, Event, EventQuery, ResourceId, UpdateEvent},
    },
};

#[derive(Clone)]
pub struct ResourcesRepository {
    pool: Pool<Postgres>,
}

impl ResourcesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Resolve a resource id to a capacity snapshot.
    ///
    /// Events come from the database; a session shift is an implicit resource
    /// that exists for every shift of every date, with capacity supplied by
    /// configuration.
    pub async fn get(
        &self,
        id: ResourceId,
        session_capacity: i64,
    ) -> AppResult<BookableResource> {
        match id {
            ResourceId::Event { event_id } => {
                let event = self.get_event(event_id).await?;
                Ok(event.as_resource())
            }
            ResourceId::Session { date, shift } => Ok(BookableResource {
                id: ResourceId::Session { date, shift },
                capacity: session_capacity,
                unit_kind: UnitKind::PerPerson,
                status: ResourceStatus::Open,
                date,
            }),
        }
    }

    /// Get event by ID
    pub async fn get_event(&self, id: i32) -> AppResult<Event> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }

    /// List events with optional date filters and pagination
    pub async fn list_events(&self, query: &EventQuery) -> AppResult<(Vec<Event>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(50);
        let offset = (page - 1) * per_page;

        // Parse the filters up front so a malformed date is a validation
        // error, not a missing bind at query time
        let start = query
            .start_date
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation("Invalid start_date".to_string()))
            })
            .transpose()?;
        let end = query
            .end_date
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation("Invalid end_date".to_string()))
            })
            .transpose()?;

        let mut conditions = Vec::new();
        let mut idx = 1;

        if start.is_some() {
            conditions.push(format!("event_date >= ${}", idx));
            idx += 1;
        }
        if end.is_some() {
            conditions.push(format!("event_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_q = format!("SELECT COUNT(*) FROM events {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(sd) = start { count_builder = count_builder.bind(sd); }
        if let Some(ed) = end { count_builder = count_builder.bind(ed); }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_q = format!(
            "SELECT * FROM events {} ORDER BY event_date DESC LIMIT {} OFFSET {}",
            where_clause, per_page, offset
        );
        let mut builder = sqlx::query_as::<_, Event>(&select_q);
        if let Some(sd) = start { builder = builder.bind(sd); }
        if let Some(ed) = end { builder = builder.bind(ed); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok((rows, total))
    }

    /// Create an event (staff)
    pub async fn create_event(&self, data: &CreateEvent) -> AppResult<Event> {
        let event_date = NaiveDate::parse_from_str(&data.event_date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid event_date".to_string()))?;

        if data.max_participants < 1 {
            return Err(AppError::Validation(
                "max_participants must be at least 1".to_string(),
            ));
        }

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                event_name, description, event_date, shift, max_participants,
                unit_kind, status, ticket_fee, additional_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.event_name)
        .bind(&data.description)
        .bind(event_date)
        .bind(data.shift.unwrap_or(0))
        .bind(data.max_participants)
        .bind(data.unit_kind.unwrap_or(0))
        .bind(data.ticket_fee.unwrap_or(0))
        .bind(&data.additional_notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update an event (staff); also how an event is closed
    pub async fn update_event(&self, id: i32, data: &UpdateEvent) -> AppResult<Event> {
        let current = self.get_event(id).await?;

        if let Some(cap) = data.max_participants {
            if cap < 1 {
                return Err(AppError::Validation(
                    "max_participants must be at least 1".to_string(),
                ));
            }
        }

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET event_name = $1, description = $2, max_participants = $3,
                status = $4, ticket_fee = $5, additional_notes = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(data.event_name.as_ref().unwrap_or(&current.event_name))
        .bind(data.description.as_ref().or(current.description.as_ref()))
        .bind(data.max_participants.unwrap_or(current.max_participants))
        .bind(data.status.unwrap_or(current.status as i16))
        .bind(data.ticket_fee.unwrap_or(current.ticket_fee))
        .bind(data.additional_notes.as_ref().or(current.additional_notes.as_ref()))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }
}
