//! Symbicodes: the UUIDv7-keyed activation ticket issued to a sale winner.

mod error;
mod models;
mod repository;
mod service;

pub use error::SymbicodeError;
pub use models::Symbicode;
pub use repository::SymbicodeRepository;
pub use service::SymbicodeService;
