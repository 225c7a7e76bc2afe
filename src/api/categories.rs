//! Category management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::category::{Category, CreateCategory, UpdateCategory},
};

/// Reorder request
#[derive(Deserialize, ToSchema)]
pub struct ReorderRequest {
    /// Target position, clamped into the valid range
    pub order: i32,
}

/// List categories in display order
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid label"),
        (status = 409, description = "Duplicate label")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state.services.categories.create(request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category's label / description
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Duplicate label")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories.update(id, request).await?;
    Ok(Json(category))
}

/// Move a category to a new position
#[utoipa::path(
    put,
    path = "/categories/{id}/reorder",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Category moved", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn reorder_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ReorderRequest>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories.reorder(id, request.order).await?;
    Ok(Json(category))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
