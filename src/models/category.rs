//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Category record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    /// Uppercased slug derived from the label, unique
    pub value: String,
    pub label: String,
    pub description: Option<String>,
    /// Dense zero-based position, unique across all categories
    pub sort_order: i32,
}

/// Create category request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategory {
    pub label: String,
    pub description: Option<String>,
}

/// Update category request.
///
/// An absent `description` keeps the current value; an explicit null
/// clears it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategory {
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
}
