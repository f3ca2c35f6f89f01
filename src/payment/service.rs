use std::sync::Arc;

use serde::Deserialize;

use crate::db::Database;
use crate::drops::{DropError, DropRepository};
use crate::notifications::email::ReceiptOutcome;
use crate::notifications::queue::{Notification, NotificationQueue};
use crate::orders::{OrderRepository, OrderStatus};
use crate::symbicode::SymbicodeService;

use super::error::PaymentError;

#[derive(Debug, Deserialize)]
struct ShippingAddress {
    #[allow(dead_code)]
    name: String,
    phone: String,
    email: String,
}

pub struct PaymentService {
    db: Arc<Database>,
    notifications: Arc<NotificationQueue>,
}

impl PaymentService {
    pub fn new(db: Arc<Database>, notifications: Arc<NotificationQueue>) -> Self {
        Self { db, notifications }
    }

    /// Confirms a gateway-reported payment for `order_code`. Idempotent:
    /// repeated webhook deliveries for an already-terminal order are a
    /// silent no-op. A sold-out race is resolved as a loss for this order
    /// (not an error) — the caller (webhook handler) should still report
    /// success to the gateway so it stops retrying.
    pub async fn confirm_payment(&self, order_code: i64) -> Result<(), PaymentError> {
        let executor = self.db.executor();
        let order_repo = OrderRepository::new(&executor);

        let order = order_repo
            .get_by_payment_order_code(order_code)
            .await
            .map_err(|_| PaymentError::OrderNotFound)?;

        if order.status().is_terminal() {
            return Ok(());
        }

        let items = order
            .parse_items()
            .map_err(|e| PaymentError::MalformedItems(e.to_string()))?;
        let item = items
            .first()
            .ok_or_else(|| PaymentError::MalformedItems("items array is empty".to_string()))?;

        let shipping: ShippingAddress = serde_json::from_str(&order.shipping_address)
            .map_err(|e| PaymentError::MalformedShippingAddress(e.to_string()))?;

        let mut tx = self.db.writer().begin().await?;

        let claim = DropRepository::increment_sold_tx(&mut tx, item.drop_id, item.quantity).await;

        match claim {
            Ok(()) => {
                OrderRepository::update_status_tx(&mut tx, order.id, OrderStatus::Paid).await?;

                let (code, _secret) =
                    SymbicodeService::generate_tx(&mut tx, item.product_id, Some(order.id)).await?;

                tx.commit().await?;

                self.notifications.enqueue(Notification::OrderConfirmation {
                    email: shipping.email.clone(),
                    order_number: crate::orders::encode_order_number(order.id),
                });
                self.notifications.enqueue(Notification::SymbicodeReceipt {
                    email: shipping.email.clone(),
                    phone: shipping.phone.clone(),
                    outcome: ReceiptOutcome::Winner,
                    symbicode: Some(code.to_string()),
                });
                self.notifications.enqueue(Notification::SheetAppend {
                    order_number: crate::orders::encode_order_number(order.id),
                    phone: shipping.phone,
                    total_amount: order.total_amount,
                });

                Ok(())
            }
            Err(DropError::SoldOut) => {
                drop(tx);
                order_repo.update_status(order.id, OrderStatus::Cancelled).await?;

                self.notifications.enqueue(Notification::SymbicodeReceipt {
                    email: shipping.email,
                    phone: shipping.phone,
                    outcome: ReceiptOutcome::Loser,
                    symbicode: None,
                });

                Ok(())
            }
            Err(DropError::Db(e)) => Err(PaymentError::Db(e)),
            Err(DropError::NotFound) => Err(PaymentError::OrderNotFound),
        }
    }
}
