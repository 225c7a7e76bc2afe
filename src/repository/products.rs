//! Products repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::product::{CreateProduct, Product, UpdateProduct},
};

#[derive(Clone)]
pub struct ProductsRepository {
    pool: Pool<Postgres>,
}

impl ProductsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all products
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get product by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Product> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    /// Get all products for a set of IDs. Errors if any ID is missing.
    pub async fn get_all(&self, ids: &[i32]) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        for id in ids {
            if !rows.iter().any(|p| p.id == *id) {
                return Err(AppError::NotFound(format!("Product {} not found", id)));
            }
        }
        Ok(rows)
    }

    /// Create a product
    pub async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        let row = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, category_id, quantity, lock_period_days, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.category_id)
        .bind(data.quantity)
        .bind(data.lock_period_days.unwrap_or(0))
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a product
    pub async fn update(&self, id: i32, data: &UpdateProduct) -> AppResult<Product> {
        let now = Utc::now();
        let current = self.get_by_id(id).await?;

        let row = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, description = $2, category_id = $3, quantity = $4,
                lock_period_days = $5, is_active = $6, modif_date = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(data.name.as_ref().unwrap_or(&current.name))
        .bind(data.description.as_ref().or(current.description.as_ref()))
        .bind(data.category_id.or(current.category_id))
        .bind(data.quantity.unwrap_or(current.quantity))
        .bind(data.lock_period_days.unwrap_or(current.lock_period_days))
        .bind(data.is_active.unwrap_or(current.is_active))
        .bind(now)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a product. Fails with a conflict if any booking references it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(r) if r.rows_affected() == 0 => {
                Err(AppError::NotFound(format!("Product {} not found", id)))
            }
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(
                AppError::Conflict(format!("Product {} is referenced by existing bookings", id)),
            ),
            Err(e) => Err(e.into()),
        }
    }
}
