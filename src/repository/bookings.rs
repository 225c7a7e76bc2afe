//! Bookings repository for database operations
//!
//! Booking creation runs its availability re-check and insert inside a
//! single transaction, with the referenced product rows locked. Two
//! concurrent bookings competing for the last unit of a product are
//! serialized on that lock, so at most one of them commits.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use sqlx::{PgExecutor, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingDetails, BookingItemDetails, CreateBooking, ReturnUpdate},
        enums::{BookingStatus, ReturnStatus},
    },
};

/// Sum of quantities booked for a product over bookings that still block
/// availability (neither completed nor cancelled), using inclusive
/// interval overlap against `[start, end_extended]`.
///
/// The stored side of the comparison is `blocked_until`, the item's end
/// date plus the lock window fixed at creation time, so a booking keeps
/// blocking the product through its post-return buffer.
pub async fn booked_quantity<'e, E>(
    executor: E,
    product_id: i32,
    start: NaiveDate,
    end_extended: NaiveDate,
) -> AppResult<i64>
where
    E: PgExecutor<'e>,
{
    let booked: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(bi.quantity), 0)::bigint
        FROM booking_items bi
        JOIN bookings b ON bi.booking_id = b.id
        WHERE bi.product_id = $1
          AND b.status NOT IN ($2, $3)
          AND bi.start_date <= $4
          AND bi.blocked_until >= $5
        "#,
    )
    .bind(product_id)
    .bind(i16::from(BookingStatus::Completed))
    .bind(i16::from(BookingStatus::Cancelled))
    .bind(end_extended)
    .bind(start)
    .fetch_one(executor)
    .await?;
    Ok(booked)
}

/// Whether every item of a booking has been returned in good condition.
/// Damaged and lost items keep the booking open for manual follow-up.
fn all_items_returned(statuses: &[ReturnStatus]) -> bool {
    !statuses.is_empty() && statuses.iter().all(|s| *s == ReturnStatus::Returned)
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all bookings with their items, newest first
    pub async fn list_details(&self) -> AppResult<Vec<BookingDetails>> {
        let booking_rows = sqlx::query("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        let item_rows = sqlx::query(
            r#"
            SELECT bi.*, p.name AS product_name
            FROM booking_items bi
            JOIN products p ON bi.product_id = p.id
            ORDER BY bi.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_booking: HashMap<i32, Vec<BookingItemDetails>> = HashMap::new();
        for row in item_rows {
            let booking_id: i32 = row.get("booking_id");
            items_by_booking
                .entry(booking_id)
                .or_default()
                .push(item_details_from_row(&row));
        }

        let mut result = Vec::with_capacity(booking_rows.len());
        for row in booking_rows {
            let id: i32 = row.get("id");
            result.push(BookingDetails {
                id,
                customer_name: row.get("customer_name"),
                customer_email: row.get("customer_email"),
                customer_phone: row.get("customer_phone"),
                notes: row.get("notes"),
                status: BookingStatus::from(row.get::<i16, _>("status")),
                created_at: row.get("created_at"),
                items: items_by_booking.remove(&id).unwrap_or_default(),
            });
        }
        Ok(result)
    }

    /// Get a booking with its items
    pub async fn get_details(&self, id: i32) -> AppResult<BookingDetails> {
        let row = sqlx::query("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        let item_rows = sqlx::query(
            r#"
            SELECT bi.*, p.name AS product_name
            FROM booking_items bi
            JOIN products p ON bi.product_id = p.id
            WHERE bi.booking_id = $1
            ORDER BY bi.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(BookingDetails {
            id,
            customer_name: row.get("customer_name"),
            customer_email: row.get("customer_email"),
            customer_phone: row.get("customer_phone"),
            notes: row.get("notes"),
            status: BookingStatus::from(row.get::<i16, _>("status")),
            created_at: row.get("created_at"),
            items: item_rows.iter().map(item_details_from_row).collect(),
        })
    }

    /// Create a booking after re-checking availability for every item.
    ///
    /// `lock_days` is the maximum lock period across the referenced
    /// products, applied to every item's effective end date. The whole
    /// operation is atomic: on any availability failure nothing is
    /// persisted.
    pub async fn create(
        &self,
        booking: &CreateBooking,
        product_ids: &[i32],
        lock_days: i32,
    ) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        // Lock referenced product rows in a stable order to serialize
        // concurrent bookings for the same products without deadlocks.
        // Capacity and active flag are re-read under the lock.
        let mut ids: Vec<i32> = product_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        let product_rows =
            sqlx::query("SELECT id, name, quantity, is_active FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE")
                .bind(&ids)
                .fetch_all(&mut *tx)
                .await?;
        let products: HashMap<i32, (String, i32, bool)> = product_rows
            .iter()
            .map(|row| {
                (
                    row.get::<i32, _>("id"),
                    (row.get("name"), row.get("quantity"), row.get("is_active")),
                )
            })
            .collect();

        for item in &booking.items {
            let (name, quantity, is_active) = products
                .get(&item.product_id)
                .ok_or_else(|| AppError::NotFound(format!("Product {} not found", item.product_id)))?;

            let extended_end = item.end_date + Duration::days(lock_days as i64);
            let booked =
                booked_quantity(&mut *tx, item.product_id, item.start_date, extended_end).await?;
            let remaining = *quantity as i64 - booked;

            if !*is_active || remaining < item.quantity as i64 {
                return Err(AppError::Availability {
                    product: name.clone(),
                    remaining: remaining.max(0),
                    requested: item.quantity,
                });
            }
        }

        let booking_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO bookings (customer_name, customer_email, customer_phone, notes, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&booking.customer_name)
        .bind(&booking.customer_email)
        .bind(&booking.customer_phone)
        .bind(&booking.notes)
        .bind(i16::from(BookingStatus::Pending))
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for item in &booking.items {
            // The lock window is fixed at creation time, using the
            // maximum lock period across the whole booking.
            let blocked_until = item.end_date + Duration::days(lock_days as i64);
            sqlx::query(
                r#"
                INSERT INTO booking_items (booking_id, product_id, start_date, end_date, blocked_until, quantity, return_status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(booking_id)
            .bind(item.product_id)
            .bind(item.start_date)
            .bind(item.end_date)
            .bind(blocked_until)
            .bind(item.quantity)
            .bind(i16::from(ReturnStatus::Pending))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(booking_id)
    }

    /// Transition a booking's status, enforcing the state machine
    pub async fn update_status(&self, id: i32, target: BookingStatus) -> AppResult<BookingDetails> {
        let mut tx = self.pool.begin().await?;

        let current: i16 = sqlx::query_scalar("SELECT status FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;
        let current = BookingStatus::from(current);

        if !current.can_transition_to(target) {
            return Err(AppError::IllegalTransition(format!(
                "Booking {} cannot go from {} to {}",
                id, current, target
            )));
        }

        sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2")
            .bind(i16::from(target))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        self.get_details(id).await
    }

    /// Apply per-item return updates and complete the booking when every
    /// item has come back as returned.
    pub async fn record_return(
        &self,
        id: i32,
        updates: &[ReturnUpdate],
    ) -> AppResult<BookingDetails> {
        let mut tx = self.pool.begin().await?;

        let status: i16 = sqlx::query_scalar("SELECT status FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;
        let status = BookingStatus::from(status);

        if status == BookingStatus::Cancelled {
            return Err(AppError::Conflict(format!(
                "Booking {} is cancelled, returns cannot be recorded",
                id
            )));
        }

        let item_rows = sqlx::query(
            "SELECT product_id, return_status FROM booking_items WHERE booking_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let mut item_statuses: HashMap<i32, ReturnStatus> = item_rows
            .iter()
            .map(|row| {
                (
                    row.get::<i32, _>("product_id"),
                    ReturnStatus::from(row.get::<i16, _>("return_status")),
                )
            })
            .collect();

        for update in updates {
            if !item_statuses.contains_key(&update.product_id) {
                return Err(AppError::NotFound(format!(
                    "Booking {} has no item for product {}",
                    id, update.product_id
                )));
            }

            sqlx::query(
                r#"
                UPDATE booking_items
                SET return_status = $1, return_notes = $2, return_date = $3
                WHERE booking_id = $4 AND product_id = $5
                "#,
            )
            .bind(i16::from(update.return_status))
            .bind(&update.return_notes)
            .bind(update.return_date)
            .bind(id)
            .bind(update.product_id)
            .execute(&mut *tx)
            .await?;

            item_statuses.insert(update.product_id, update.return_status);
        }

        let statuses: Vec<ReturnStatus> = item_statuses.values().copied().collect();
        if status != BookingStatus::Completed && all_items_returned(&statuses) {
            sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2")
                .bind(i16::from(BookingStatus::Completed))
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        self.get_details(id).await
    }
}

fn item_details_from_row(row: &sqlx::postgres::PgRow) -> BookingItemDetails {
    BookingItemDetails {
        id: row.get("id"),
        product_id: row.get("product_id"),
        product_name: row.get("product_name"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        blocked_until: row.get("blocked_until"),
        quantity: row.get("quantity"),
        return_status: ReturnStatus::from(row.get::<i16, _>("return_status")),
        return_date: row.get("return_date"),
        return_notes: row.get("return_notes"),
    }
}
