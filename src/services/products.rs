//! Product management service

use crate::{
    error::{AppError, AppResult},
    models::product::{CreateProduct, Product, UpdateProduct},
    repository::Repository,
};

#[derive(Clone)]
pub struct ProductsService {
    repository: Repository,
}

impl ProductsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Product>> {
        self.repository.products.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Product> {
        self.repository.products.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        validate_capacity(data.quantity, data.lock_period_days)?;
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        self.repository.products.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateProduct) -> AppResult<Product> {
        if let Some(quantity) = data.quantity {
            validate_capacity(quantity, data.lock_period_days)?;
        } else if data.lock_period_days.is_some() {
            validate_capacity(0, data.lock_period_days)?;
        }
        self.repository.products.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.products.delete(id).await
    }
}

fn validate_capacity(quantity: i32, lock_period_days: Option<i32>) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::Validation(
            "quantity must not be negative".to_string(),
        ));
    }
    if lock_period_days.map(|d| d < 0).unwrap_or(false) {
        return Err(AppError::Validation(
            "lock_period_days must not be negative".to_string(),
        ));
    }
    Ok(())
}
