//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, categories, health, products};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gearbook API",
        version = "0.3.0",
        description = "Equipment Rental Booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Gearbook Team", email = "contact@gearbook.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Products
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::check_availability,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking_status,
        bookings::record_return,
        // Categories
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::reorder_category,
        categories::delete_category,
    ),
    components(
        schemas(
            // Products
            crate::models::product::Product,
            crate::models::product::CreateProduct,
            crate::models::product::UpdateProduct,
            crate::models::product::AvailabilityResult,
            products::AvailabilityQuery,
            // Bookings
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingItemDetails,
            crate::models::booking::CreateBooking,
            crate::models::booking::CreateBookingItem,
            crate::models::booking::ReturnItemUpdate,
            crate::models::enums::BookingStatus,
            crate::models::enums::ReturnStatus,
            bookings::UpdateStatusRequest,
            bookings::RecordReturnRequest,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            categories::ReorderRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Equipment inventory management"),
        (name = "bookings", description = "Booking lifecycle and returns"),
        (name = "categories", description = "Category management and ordering")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
