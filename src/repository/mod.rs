//! Repository layer for database operations

pub mod bookings;
pub mod categories;
pub mod products;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub products: products::ProductsRepository,
    pub bookings: bookings::BookingsRepository,
    pub categories: categories::CategoriesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            products: products::ProductsRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            pool,
        }
    }
}
