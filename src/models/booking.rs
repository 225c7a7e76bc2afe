//! Booking model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{BookingStatus, ReturnStatus};

/// Booking with its line items, as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<BookingItemDetails>,
}

/// Line item joined with its product summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingItemDetails {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// End of the reservation window: end_date plus the lock period
    /// applied when the booking was created
    pub blocked_until: NaiveDate,
    pub quantity: i32,
    pub return_status: ReturnStatus,
    pub return_date: Option<NaiveDate>,
    pub return_notes: Option<String>,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    #[validate(length(min = 1, message = "customer_name must not be empty"))]
    pub customer_name: String,
    #[validate(email(message = "customer_email must be a valid email address"))]
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "at least one item is required"))]
    pub items: Vec<CreateBookingItem>,
}

/// Line item of a create booking request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBookingItem {
    pub product_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub quantity: i32,
}

/// One entry of a return update, matched to booking items by product
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReturnItemUpdate {
    pub product_id: i32,
    /// One of pending / returned / damaged / lost
    pub return_status: String,
    pub return_notes: Option<String>,
    /// Defaults to today when omitted
    pub return_date: Option<NaiveDate>,
}

/// Validated return update, ready to apply
#[derive(Debug, Clone)]
pub struct ReturnUpdate {
    pub product_id: i32,
    pub return_status: ReturnStatus,
    pub return_notes: Option<String>,
    pub return_date: NaiveDate,
}
