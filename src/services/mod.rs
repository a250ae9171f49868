//! Business logic services

pub mod loans;
pub mod memberships;
pub mod payments;
pub mod reservations;

use std::sync::Arc;

use crate::{
    config::{LoansConfig, ReservationsConfig},
    domain::civil::Clock,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub reservations: reservations::ReservationsService,
    pub loans: loans::LoansService,
    pub payments: payments::PaymentsService,
    pub memberships: memberships::MembershipsService,
}

impl Services {
    /// Create all services with the given repository and an injected clock
    pub fn new(
        repository: Repository,
        reservations_config: ReservationsConfig,
        loans_config: LoansConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let reservations = reservations::ReservationsService::new(
            repository.clone(),
            reservations_config,
            clock.clone(),
        );
        let loans = loans::LoansService::new(repository.clone(), loans_config, clock.clone());
        let payments =
            payments::PaymentsService::new(reservations.clone(), loans.clone());
        let memberships = memberships::MembershipsService::new(repository);

        Self {
            reservations,
            loans,
            payments,
            memberships,
        }
    }
}
