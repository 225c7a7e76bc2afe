//! Categories repository for database operations
//!
//! The sort_order column holds a dense zero-based sequence. Every
//! mutation that touches ordering runs in a transaction and shifts the
//! affected siblings so the sequence stays exactly 0..N-1. The unique
//! constraint on sort_order is deferred to commit: siblings may pass
//! through a position the moved row still holds mid-transaction.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory},
};

/// Sibling range to shift for a move from `old_order` to `new_order`,
/// as `(low, high, delta)` inclusive. None when the move is a no-op.
///
/// Moving up decrements everything in `(old, new]`; moving down
/// increments everything in `[new, old)`.
pub fn shift_window(old_order: i32, new_order: i32) -> Option<(i32, i32, i32)> {
    match new_order.cmp(&old_order) {
        std::cmp::Ordering::Greater => Some((old_order + 1, new_order, -1)),
        std::cmp::Ordering::Less => Some((new_order, old_order - 1, 1)),
        std::cmp::Ordering::Equal => None,
    }
}

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all categories in display order
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY sort_order")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Create a category, appended at the end of the ordering
    pub async fn create(&self, data: &CreateCategory, value: &str) -> AppResult<Category> {
        let mut tx = self.pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE value = $1)")
                .bind(value)
                .fetch_one(&mut *tx)
                .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                data.label
            )));
        }

        let next_order: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (value, label, description, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(value)
        .bind(&data.label)
        .bind(&data.description)
        .bind(next_order as i32)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Update label / value / description of a category
    pub async fn update(
        &self,
        id: i32,
        label: &str,
        value: &str,
        description: Option<&str>,
    ) -> AppResult<Category> {
        let duplicate: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE value = $1 AND id != $2)",
        )
        .bind(value)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if duplicate {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                label
            )));
        }

        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET value = $1, label = $2, description = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(value)
        .bind(label)
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Move a category to `target_order`, shifting siblings to keep the
    /// ordering dense. Targets outside 0..N-1 are clamped.
    pub async fn reorder(&self, id: i32, target_order: i32) -> AppResult<Category> {
        let mut tx = self.pool.begin().await?;

        let old_order: i32 =
            sqlx::query_scalar("SELECT sort_order FROM categories WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await?;
        let target = target_order.clamp(0, (count as i32 - 1).max(0));

        if let Some((low, high, delta)) = shift_window(old_order, target) {
            sqlx::query(
                r#"
                UPDATE categories SET sort_order = sort_order + $1
                WHERE sort_order >= $2 AND sort_order <= $3
                "#,
            )
            .bind(delta)
            .bind(low)
            .bind(high)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE categories SET sort_order = $1 WHERE id = $2")
                .bind(target)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        self.get_by_id(id).await
    }

    /// Delete a category and close the gap it leaves in the ordering.
    /// Products referencing it fall back to no category.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let old_order: i32 =
            sqlx::query_scalar("SELECT sort_order FROM categories WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        sqlx::query("UPDATE products SET category_id = NULL WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE categories SET sort_order = sort_order - 1 WHERE sort_order > $1")
            .bind(old_order)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
