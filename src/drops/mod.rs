//! Limited-drop catalog and the atomic stock-claim primitive.

mod error;
mod models;
mod repository;

pub use error::DropError;
pub use models::Drop;
pub use repository::DropRepository;
