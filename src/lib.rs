//! Gearbook Equipment Rental Booking System
//!
//! A Rust implementation of the Gearbook equipment-rental server,
//! providing a REST JSON API for managing inventory, categories, and
//! bookings with date-range availability checks.

use std::sync::Arc;

pub mod api;
pub mod config;
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
