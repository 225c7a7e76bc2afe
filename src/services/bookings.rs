//! Booking lifecycle service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingDetails, CreateBooking, ReturnItemUpdate, ReturnUpdate},
        enums::{BookingStatus, ReturnStatus},
    },
    repository::Repository,
    services::email::EmailService,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    email: EmailService,
}

impl BookingsService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    /// List all bookings
    pub async fn list(&self) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list_details().await
    }

    /// Get a booking with its items
    pub async fn get(&self, id: i32) -> AppResult<BookingDetails> {
        self.repository.bookings.get_details(id).await
    }

    /// Create a booking.
    ///
    /// The lock window applied to every item is the maximum lock period
    /// across all referenced products. A booking mixing a high-lock item
    /// with lock-free ones therefore reserves all of them for the longer
    /// window; simpler to reason about than per-item windows, at the
    /// cost of being stricter than strictly necessary.
    pub async fn create(&self, request: CreateBooking) -> AppResult<BookingDetails> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        for item in &request.items {
            if item.start_date >= item.end_date {
                return Err(AppError::Validation(format!(
                    "Item for product {}: start_date must be before end_date",
                    item.product_id
                )));
            }
            if item.quantity < 1 {
                return Err(AppError::Validation(format!(
                    "Item for product {}: quantity must be at least 1",
                    item.product_id
                )));
            }
        }

        let product_ids: Vec<i32> = request.items.iter().map(|i| i.product_id).collect();
        let products = self.repository.products.get_all(&product_ids).await?;

        // The lock window of the whole booking is the longest lock
        // period among its products.
        let max_lock = products
            .iter()
            .map(|p| p.lock_period_days)
            .max()
            .unwrap_or(0);

        let booking_id = self
            .repository
            .bookings
            .create(&request, &product_ids, max_lock)
            .await?;

        let booking = self.repository.bookings.get_details(booking_id).await?;
        self.notify("booking.created", &booking);
        Ok(booking)
    }

    /// Transition a booking's status
    pub async fn update_status(&self, id: i32, status: &str) -> AppResult<BookingDetails> {
        let target = BookingStatus::parse(status)
            .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", status)))?;
        self.repository.bookings.update_status(id, target).await
    }

    /// Record per-item returns, completing the booking when every item
    /// is back in good condition
    pub async fn record_return(
        &self,
        id: i32,
        items: Vec<ReturnItemUpdate>,
    ) -> AppResult<BookingDetails> {
        let today = Utc::now().date_naive();
        let mut updates = Vec::with_capacity(items.len());
        for item in items {
            let return_status = ReturnStatus::parse(&item.return_status).ok_or_else(|| {
                AppError::Validation(format!("Unknown return status '{}'", item.return_status))
            })?;
            updates.push(ReturnUpdate {
                product_id: item.product_id,
                return_status,
                return_notes: item.return_notes,
                return_date: item.return_date.unwrap_or(today),
            });
        }

        let booking = self.repository.bookings.record_return(id, &updates).await?;
        self.notify("booking.returned", &booking);
        Ok(booking)
    }

    // Fire-and-forget notification dispatch. A delivery failure is
    // logged and swallowed; it never fails the booking operation.
    fn notify(&self, event: &'static str, booking: &BookingDetails) {
        let email = self.email.clone();
        let booking = booking.clone();
        tokio::spawn(async move {
            let result = match event {
                "booking.created" => email.send_booking_created(&booking).await,
                _ => email.send_booking_returned(&booking).await,
            };
            if let Err(e) = result {
                tracing::warn!(
                    booking_id = booking.id,
                    event,
                    "Failed to send booking notification: {}",
                    e
                );
            }
        });
    }
}
