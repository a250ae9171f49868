//! Membership applications repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{enums::MembershipStatus, membership::MembershipApplication},
};

#[derive(Clone)]
pub struct MembershipsRepository {
    pool: Pool<Postgres>,
}

impl MembershipsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get application by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MembershipApplication> {
        sqlx::query_as::<_, MembershipApplication>(
            "SELECT * FROM membership_applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Membership application {} not found", id)))
    }

    /// List applications, newest first
    pub async fn list(&self) -> AppResult<Vec<MembershipApplication>> {
        let applications = sqlx::query_as::<_, MembershipApplication>(
            "SELECT * FROM membership_applications ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// Persist a validated status transition
    pub async fn update_status(
        &self,
        id: i32,
        status: MembershipStatus,
        notes: Option<&str>,
    ) -> AppResult<MembershipApplication> {
        sqlx::query_as::<_, MembershipApplication>(
            r#"
            UPDATE membership_applications
            SET status = $1, notes = COALESCE($2, notes), updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Membership application {} not found", id)))
    }
}
