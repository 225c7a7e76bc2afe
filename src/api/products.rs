//! Product management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::product::{AvailabilityResult, CreateProduct, Product, UpdateProduct},
};

/// Query parameters for an availability check
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// First day of the requested range
    pub start_date: NaiveDate,
    /// Last day of the requested range
    pub end_date: NaiveDate,
    /// Units requested
    pub quantity: i32,
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.services.products.list().await?;
    Ok(Json(products))
}

/// Get a product
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = state.services.products.get(id).await?;
    Ok(Json(product))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_product(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.services.products.create(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let product = state.services.products.update(id, request).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product referenced by bookings")
    )
)]
pub async fn delete_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check availability of a product over a date range
#[utoipa::path(
    get,
    path = "/products/{id}/availability",
    tag = "products",
    params(
        ("id" = i32, Path, description = "Product ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability result", body = AvailabilityResult),
        (status = 400, description = "Invalid date range or quantity"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResult>> {
    let result = state
        .services
        .availability
        .check(id, query.start_date, query.end_date, query.quantity)
        .await?;
    Ok(Json(result))
}
