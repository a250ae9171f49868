//! Membership applications service

use crate::{
    domain::membership,
    error::AppResult,
    models::membership::{MembershipApplication, UpdateMembershipStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembershipsService {
    repository: Repository,
}

impl MembershipsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<MembershipApplication>> {
        self.repository.memberships.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MembershipApplication> {
        self.repository.memberships.get_by_id(id).await
    }

    /// Apply a staff-driven status transition after validating it against
    /// the state machine
    pub async fn update_status(
        &self,
        id: i32,
        update: &UpdateMembershipStatus,
    ) -> AppResult<MembershipApplication> {
        let application = self.repository.memberships.get_by_id(id).await?;
        let target = update.status.into();
        let next = membership::apply_transition(application.status, target)?;

        self.repository
            .memberships
            .update_status(id, next, update.notes.as_deref())
            .await
    }
}
