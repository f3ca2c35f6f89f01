//! Phase 1 of the checkout: validate the request, snapshot-check the drop,
//! create a pending order, and hand the purchaser off to the payment
//! gateway's checkout page.

mod error;
mod service;

pub use error::PurchaseError;
pub use service::{PurchaseRequest, PurchaseResult, PurchaseService};
