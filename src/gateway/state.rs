use std::sync::Arc;

use crate::db::Database;
use crate::notifications::{EmailSink, NotificationQueue, PaymentGateway, SpreadsheetSink};
use crate::payment::PaymentService;
use crate::purchase::PurchaseService;

/// Gateway application state (shared across every handler).
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub notifications: Arc<NotificationQueue>,
    pub email: Arc<dyn EmailSink>,
    pub sheets: Arc<dyn SpreadsheetSink>,
    pub frontend_url: String,
    pub payos_checksum_key: String,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        gateway: Arc<dyn PaymentGateway>,
        notifications: Arc<NotificationQueue>,
        email: Arc<dyn EmailSink>,
        sheets: Arc<dyn SpreadsheetSink>,
        frontend_url: String,
        payos_checksum_key: String,
    ) -> Self {
        Self {
            db,
            gateway,
            notifications,
            email,
            sheets,
            frontend_url,
            payos_checksum_key,
        }
    }

    pub fn purchase_service(&self) -> PurchaseService {
        PurchaseService::new(self.db.clone(), self.gateway.clone(), self.frontend_url.clone())
    }

    pub fn payment_service(&self) -> PaymentService {
        PaymentService::new(self.db.clone(), self.notifications.clone())
    }
}
