//! Availability computation service
//!
//! Availability is always recomputed from the booking table, never kept
//! as a running counter. A denormalized counter would need invalidation
//! on every status change; the derived sum cannot drift.

use chrono::{Duration, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::product::{AvailabilityResult, Product},
    repository::{bookings::booked_quantity, Repository},
};

/// Effective end boundary of an availability query: the nominal end date
/// plus the product's lock period, so a new booking placed just before
/// an existing one still leaves room for its own post-return buffer.
pub fn extended_end(end: NaiveDate, lock_period_days: i32) -> NaiveDate {
    end + Duration::days(lock_period_days as i64)
}

/// Derive the availability verdict from a product's capacity and the
/// quantity already booked over the queried window.
pub fn summarize(product: &Product, booked: i64, requested: i32) -> AvailabilityResult {
    let remaining = product.quantity as i64 - booked;
    AvailabilityResult {
        is_available: remaining >= requested as i64 && product.is_active,
        total_quantity: product.quantity,
        booked_quantity: booked,
        remaining_quantity: remaining,
        requested_quantity: requested,
    }
}

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
}

impl AvailabilityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check whether `requested` units of a product are free over
    /// `[start, end]`. Pure read, idempotent, safe to call both for
    /// pre-submit UI checks and as the authoritative validation.
    pub async fn check(
        &self,
        product_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        requested: i32,
    ) -> AppResult<AvailabilityResult> {
        if start >= end {
            return Err(AppError::Validation(
                "start_date must be before end_date".to_string(),
            ));
        }
        if requested < 1 {
            return Err(AppError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }

        let product = self.repository.products.get_by_id(product_id).await?;
        let end_extended = extended_end(end, product.lock_period_days);
        let booked =
            booked_quantity(&self.repository.pool, product_id, start, end_extended).await?;

        Ok(summarize(&product, booked, requested))
    }
}
