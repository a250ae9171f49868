//! Room 19 Reservation & Loan Server
//!
//! A Rust server for The Room 19 library: capacity-bounded session and event
//! bookings, and time-based loan lifecycle management (due dates, fines,
//! bounded extensions), all computed against WIB (UTC+7) civil dates.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
