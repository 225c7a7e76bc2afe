//! Business logic services

pub mod availability;
pub mod bookings;
pub mod categories;
pub mod email;
pub mod products;

use crate::{config::EmailConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub bookings: bookings::BookingsService,
    pub categories: categories::CategoriesService,
    pub products: products::ProductsService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(repository: Repository, email_config: EmailConfig) -> AppResult<Self> {
        let email = email::EmailService::new(email_config);
        Ok(Self {
            availability: availability::AvailabilityService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone(), email.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            products: products::ProductsService::new(repository),
            email,
        })
    }
}
