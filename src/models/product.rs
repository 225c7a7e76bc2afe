//! Product (equipment item) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Product record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    /// Total owned units. Static capacity: never mutated by bookings,
    /// availability is derived from it on every check.
    pub quantity: i32,
    /// Days after an item's end date during which it stays reserved
    /// (cleaning / inspection buffer)
    pub lock_period_days: i32,
    pub is_active: bool,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create product request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub quantity: i32,
    pub lock_period_days: Option<i32>,
    pub is_active: Option<bool>,
}

/// Update product request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub quantity: Option<i32>,
    pub lock_period_days: Option<i32>,
    pub is_active: Option<bool>,
}

/// Availability check result for one product / date range / quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResult {
    pub is_available: bool,
    pub total_quantity: i32,
    pub booked_quantity: i64,
    pub remaining_quantity: i64,
    pub requested_quantity: i32,
}
