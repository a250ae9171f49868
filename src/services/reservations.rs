//! Reservations service
//!
//! Drives the availability engine over repository reads and owns the
//! check-then-commit booking flow. The engine's answer is an optimistic,
//! user-facing hint; the conditional insert in the bookings repository is
//! the actual enforcement point, so a capacity change between check and
//! commit is caught at commit.

use std::sync::Arc;

use crate::{
    config::ReservationsConfig,
    domain::{availability, civil::Clock},
    error::AppResult,
    models::{
        booking::{Availability, Booking, CreateBooking},
        resource::{CreateEvent, Event, EventQuery, ResourceId, UpdateEvent},
    },
    repository::{bookings::InsertOutcome, Repository},
};

/// Typed outcome of a booking attempt; "no slot" is business as usual,
/// not an error
#[derive(Debug)]
pub enum BookingOutcome {
    Confirmed(Booking),
    Rejected(Availability),
}

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    config: ReservationsConfig,
    clock: Arc<dyn Clock>,
}

impl ReservationsService {
    pub fn new(
        repository: Repository,
        config: ReservationsConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Capacity decision for a candidate booking
    pub async fn check_availability(
        &self,
        resource_id: ResourceId,
        party_size: i64,
    ) -> AppResult<Availability> {
        let resource = self
            .repository
            .resources
            .get(resource_id, self.config.session_capacity)
            .await?;
        let bookings = self.repository.bookings.list_confirmed(&resource_id).await?;

        let decision = availability::check_availability(
            &resource,
            &bookings,
            party_size,
            self.clock.today(),
        )?;
        Ok(decision)
    }

    /// Units still free on a resource, for display ("3 slots left")
    pub async fn remaining_slots(&self, resource_id: ResourceId) -> AppResult<i64> {
        let resource = self
            .repository
            .resources
            .get(resource_id, self.config.session_capacity)
            .await?;
        let bookings = self.repository.bookings.list_confirmed(&resource_id).await?;
        Ok(availability::remaining_units(&resource, &bookings).max(0))
    }

    /// Attempt a booking: advisory pre-check, then the atomic conditional
    /// insert. Both can reject; only the insert decides.
    pub async fn create_booking(&self, data: CreateBooking) -> AppResult<BookingOutcome> {
        let resource = self
            .repository
            .resources
            .get(data.resource, self.config.session_capacity)
            .await?;
        let bookings = self.repository.bookings.list_confirmed(&data.resource).await?;

        let decision = availability::check_availability(
            &resource,
            &bookings,
            data.party_size(),
            self.clock.today(),
        )?;
        if !decision.available {
            return Ok(BookingOutcome::Rejected(decision));
        }

        match self
            .repository
            .bookings
            .insert_if_capacity_allows(&resource, &data)
            .await?
        {
            InsertOutcome::Inserted(booking) => {
                tracing::info!(
                    booking_id = booking.id,
                    party_size = booking.party_size(),
                    "booking confirmed"
                );
                Ok(BookingOutcome::Confirmed(booking))
            }
            InsertOutcome::CapacityExceeded => {
                // A concurrent commit took the remaining slots between our
                // read and the insert
                let bookings =
                    self.repository.bookings.list_confirmed(&data.resource).await?;
                let remaining =
                    availability::remaining_units(&resource, &bookings).max(0);
                Ok(BookingOutcome::Rejected(Availability {
                    available: false,
                    remaining_units: remaining,
                    capacity: resource.capacity,
                    reason: Some("fully booked".to_string()),
                }))
            }
        }
    }

    /// List events with filters (public catalog of events)
    pub async fn list_events(&self, query: &EventQuery) -> AppResult<(Vec<Event>, i64)> {
        self.repository.resources.list_events(query).await
    }

    pub async fn get_event(&self, id: i32) -> AppResult<Event> {
        self.repository.resources.get_event(id).await
    }

    /// Create an event (staff)
    pub async fn create_event(&self, data: &CreateEvent) -> AppResult<Event> {
        self.repository.resources.create_event(data).await
    }

    /// Update an event (staff); capacity and closure live here
    pub async fn update_event(&self, id: i32, data: &UpdateEvent) -> AppResult<Event> {
        self.repository.resources.update_event(id, data).await
    }

    /// List all bookings (staff view)
    pub async fn list_bookings(&self) -> AppResult<Vec<Booking>> {
        self.repository.bookings.list_all().await
    }

    /// Cancel a booking (staff)
    pub async fn cancel_booking(&self, id: i32, reason: Option<&str>) -> AppResult<Booking> {
        self.repository.bookings.cancel(id, reason).await
    }

    /// Cascade a failed payment into a cancellation
    pub async fn cancel_by_payment(&self, payment_id: &str) -> AppResult<Option<Booking>> {
        let cancelled = self.repository.bookings.cancel_by_payment(payment_id).await?;
        if let Some(booking) = &cancelled {
            tracing::info!(booking_id = booking.id, "booking cancelled after failed payment");
        }
        Ok(cancelled)
    }
}
