//! Domain models

pub mod booking;
pub mod enums;
pub mod loan;
pub mod membership;
pub mod resource;
