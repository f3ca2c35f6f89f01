//! Orders: the two-phase checkout's persistent record, plus the bijective
//! order-number codec used to print human-facing order references.

mod codec;
mod error;
mod models;
mod repository;

pub use codec::encode_order_number;
pub use error::OrderError;
pub use models::{Order, OrderItem, OrderStatus, PaymentMethod};
pub use repository::OrderRepository;
