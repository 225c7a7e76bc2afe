//! API handlers for Gearbook REST endpoints

pub mod bookings;
pub mod categories;
pub mod health;
pub mod openapi;
pub mod products;
