//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle status (stored in bookings.status)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum BookingStatus {
    Pending = 0,
    Confirmed = 1,
    Completed = 2,
    Cancelled = 3,
}

impl BookingStatus {
    /// Parse a status name from an API payload
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether a transition from `self` to `target` is legal.
    ///
    /// Completed and cancelled are terminal. Backward transitions are
    /// rejected, as is re-applying the current status.
    pub fn can_transition_to(self, target: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            (Pending, Confirmed)
                | (Pending, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }

    /// Whether bookings in this status block availability
    pub fn blocks_availability(self) -> bool {
        !matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl From<i16> for BookingStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => BookingStatus::Confirmed,
            2 => BookingStatus::Completed,
            3 => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}

impl From<BookingStatus> for i16 {
    fn from(s: BookingStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ReturnStatus
// ---------------------------------------------------------------------------

/// Per-item return status (stored in booking_items.return_status)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ReturnStatus {
    Pending = 0,
    Returned = 1,
    Damaged = 2,
    Lost = 3,
}

impl ReturnStatus {
    /// Parse a return status name from an API payload
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReturnStatus::Pending),
            "returned" => Some(ReturnStatus::Returned),
            "damaged" => Some(ReturnStatus::Damaged),
            "lost" => Some(ReturnStatus::Lost),
            _ => None,
        }
    }
}

impl From<i16> for ReturnStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => ReturnStatus::Returned,
            2 => ReturnStatus::Damaged,
            3 => ReturnStatus::Lost,
            _ => ReturnStatus::Pending,
        }
    }
}

impl From<ReturnStatus> for i16 {
    fn from(s: ReturnStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReturnStatus::Pending => "pending",
            ReturnStatus::Returned => "returned",
            ReturnStatus::Damaged => "damaged",
            ReturnStatus::Lost => "lost",
        };
        write!(f, "{}", label)
    }
}
