//! Booking management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, CreateBooking, ReturnItemUpdate},
};

/// Status update request
#[derive(Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of pending / confirmed / completed / cancelled
    pub status: String,
}

/// Return recording request
#[derive(Deserialize, ToSchema)]
pub struct RecordReturnRequest {
    pub items: Vec<ReturnItemUpdate>,
}

/// List all bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "All bookings", body = Vec<BookingDetails>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.list().await?;
    Ok(Json(bookings))
}

/// Get a booking with its items
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking))
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingDetails),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Referenced product not found"),
        (status = 409, description = "Not enough units available")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state.services.bookings.create(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Transition a booking's status
#[utoipa::path(
    put,
    path = "/bookings/{id}/status",
    tag = "bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = BookingDetails),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Illegal status transition")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state
        .services
        .bookings
        .update_status(id, &request.status)
        .await?;
    Ok(Json(booking))
}

/// Record per-item returns on a booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/return",
    tag = "bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = RecordReturnRequest,
    responses(
        (status = 200, description = "Returns recorded", body = BookingDetails),
        (status = 400, description = "Unknown return status value"),
        (status = 404, description = "Booking or item not found"),
        (status = 409, description = "Booking is cancelled")
    )
)]
pub async fn record_return(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<RecordReturnRequest>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state
        .services
        .bookings
        .record_return(id, request.items)
        .await?;
    Ok(Json(booking))
}
