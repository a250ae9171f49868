//! API handlers for Room 19 REST endpoints
//!
//! Authentication and session lookup belong to the surrounding application
//! layer and are not implemented here.

pub mod availability;
pub mod bookings;
pub mod events;
pub mod health;
pub mod loans;
pub mod memberships;
pub mod openapi;
pub mod payments;
