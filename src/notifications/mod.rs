//! Capability interfaces for everything that happens after a purchase is
//! decided: charging/checking out with the payment gateway, and the
//! best-effort notification fan-out (email, spreadsheet) that follows a win
//! or a loss. Narrow traits so tests can swap in a stub without touching the
//! services that depend on them.

pub mod email;
pub mod gateway_client;
pub mod queue;
pub mod sheets;

pub use email::{EmailSink, ReceiptOutcome};
pub use gateway_client::{CheckoutRequest, CheckoutResponse, MockPaymentGateway, PaymentGateway};
pub use queue::{Notification, NotificationQueue};
pub use sheets::SpreadsheetSink;
