//! HTTP handlers, one module per resource. Each function borrows
//! `AppState` and delegates to the matching service/repository; no
//! business logic lives here beyond request/response shaping.

pub mod drops;
pub mod health;
pub mod orders;
pub mod symbicode;
pub mod webhook;
