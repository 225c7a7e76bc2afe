//! Domain models

pub mod booking;
pub mod category;
pub mod enums;
pub mod product;
