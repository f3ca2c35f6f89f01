//! Read-only product catalog. Seeding and management are out of scope;
//! this module only answers the price/name lookups the purchase flow needs.

mod models;
mod repository;

pub use models::Product;
pub use repository::{ProductError, ProductRepository};
