//! Repository layer for database operations

pub mod bookings;
pub mod loans;
pub mod memberships;
pub mod resources;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub resources: resources::ResourcesRepository,
    pub bookings: bookings::BookingsRepository,
    pub loans: loans::LoansRepository,
    pub memberships: memberships::MembershipsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            resources: resources::ResourcesRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            memberships: memberships::MembershipsRepository::new(pool.clone()),
            pool,
        }
    }
}
