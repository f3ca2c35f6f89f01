//! Limited-drop sale backend.
//!
//! The concurrency-critical core is [`drops`] (the atomic stock claim),
//! [`orders`], [`symbicode`], [`purchase`] (phase 1 checkout), and
//! [`payment`] (phase 2, the webhook-triggered winner/loser transaction).
//! Everything else — [`db`]'s split writer/reader engine, [`notifications`],
//! [`products`], and [`gateway`] — is ambient infrastructure the core runs
//! on top of.

pub mod config;
pub mod db;
pub mod drops;
pub mod gateway;
pub mod logging;
pub mod maintenance;
pub mod notifications;
pub mod orders;
pub mod payment;
pub mod products;
pub mod purchase;
pub mod symbicode;

pub use config::AppConfig;
pub use db::Database;
