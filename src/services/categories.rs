//! Category management service

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
    repository::Repository,
};

/// Normalize a label into its stored value: uppercased, alphanumeric
/// runs joined by underscores.
pub fn slug_value(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_sep = false;
    for c in label.trim().chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            for u in c.to_uppercase() {
                out.push(u);
            }
        } else {
            pending_sep = true;
        }
    }
    out
}

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List categories in display order
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    /// Create a category, appended at the end of the ordering
    pub async fn create(&self, data: CreateCategory) -> AppResult<Category> {
        let value = slug_value(&data.label);
        if value.is_empty() {
            return Err(AppError::Validation(
                "label must contain at least one alphanumeric character".to_string(),
            ));
        }
        self.repository.categories.create(&data, &value).await
    }

    /// Update label / description; the stored value follows the label
    pub async fn update(&self, id: i32, data: UpdateCategory) -> AppResult<Category> {
        let current = self.repository.categories.get_by_id(id).await?;
        let label = data.label.unwrap_or(current.label);
        let value = slug_value(&label);
        if value.is_empty() {
            return Err(AppError::Validation(
                "label must contain at least one alphanumeric character".to_string(),
            ));
        }
        // Absent field keeps the stored description, explicit null clears it
        let description = match data.description {
            Some(d) => d,
            None => current.description,
        };
        self.repository
            .categories
            .update(id, &label, &value, description.as_deref())
            .await
    }

    /// Move a category to a new position
    pub async fn reorder(&self, id: i32, target_order: i32) -> AppResult<Category> {
        self.repository.categories.reorder(id, target_order).await
    }

    /// Delete a category
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }
}
