use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::Database;
use crate::drops::DropRepository;
use crate::notifications::gateway_client::{CheckoutItem, CheckoutRequest, PaymentGateway};
use crate::orders::{OrderItem, OrderRepository, PaymentMethod};
use crate::products::ProductRepository;

use super::error::PurchaseError;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    pub quantity: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub province: String,
    pub district: String,
    pub ward: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseResult {
    pub message: String,
    pub payment_url: String,
    pub order_code: i64,
}

#[derive(Serialize)]
struct ShippingAddress<'a> {
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    address: &'a str,
    province: &'a str,
    district: &'a str,
    ward: &'a str,
}

pub struct PurchaseService {
    db: Arc<Database>,
    gateway: Arc<dyn PaymentGateway>,
    frontend_url: String,
}

impl PurchaseService {
    pub fn new(db: Arc<Database>, gateway: Arc<dyn PaymentGateway>, frontend_url: String) -> Self {
        Self {
            db,
            gateway,
            frontend_url,
        }
    }

    pub async fn purchase(
        &self,
        drop_id: i64,
        request: &PurchaseRequest,
    ) -> Result<PurchaseResult, PurchaseError> {
        let executor = self.db.executor();
        let drop = DropRepository::new(&executor).get_by_id(drop_id).await?;

        if !drop.is_active {
            return Err(PurchaseError::DropInactive);
        }

        let now = chrono::Utc::now();
        if now < drop.start_time {
            return Err(PurchaseError::NotStarted);
        }
        if let Some(end_time) = drop.end_time {
            if now >= end_time {
                return Err(PurchaseError::Ended);
            }
        }
        if drop.is_sold_out() {
            return Err(PurchaseError::SoldOut);
        }
        if drop.drop_size_reached() {
            return Err(PurchaseError::DropSizeLimit);
        }

        validate(request)?;

        let product = ProductRepository::new(&executor)
            .get_by_id(drop.product_id)
            .await?;

        let order_code = mint_order_code();
        let amount = product.price * request.quantity;

        let shipping = ShippingAddress {
            name: &request.name,
            phone: &request.phone,
            email: &request.email,
            address: &request.address,
            province: &request.province,
            district: &request.district,
            ward: &request.ward,
        };
        let shipping_json = serde_json::to_string(&shipping).map_err(|e| {
            PurchaseError::OrderCreation(format!("failed to encode shipping address: {e}"))
        })?;

        let items = vec![OrderItem {
            product_id: product.id,
            drop_id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: request.quantity,
        }];
        let items_json = serde_json::to_string(&items)
            .map_err(|e| PurchaseError::OrderCreation(format!("failed to encode items: {e}")))?;

        // Order persisted before the checkout call so a successful payment
        // always has a matching local record; a failed checkout call leaves
        // it pending (abandoned cart) rather than losing the attempt.
        OrderRepository::new(&executor)
            .create(
                &request.phone,
                &shipping_json,
                &items_json,
                PaymentMethod::ExternalGateway as i64,
                order_code,
                amount,
            )
            .await?;

        let checkout = self
            .gateway
            .create_checkout(CheckoutRequest {
                order_code,
                amount,
                description: format!("Drop {drop_id}"),
                return_url: format!("{}/#payment-success", self.frontend_url),
                cancel_url: format!("{}/#payment-cancel", self.frontend_url),
                items: vec![CheckoutItem {
                    name: product.name,
                    quantity: request.quantity,
                    price: product.price,
                }],
            })
            .await?;

        Ok(PurchaseResult {
            message: "Order created, complete payment to confirm your purchase.".to_string(),
            payment_url: checkout.checkout_url,
            order_code,
        })
    }
}

/// Validation runs in a fixed field order so error responses are
/// deterministic for a given malformed request.
fn validate(request: &PurchaseRequest) -> Result<(), PurchaseError> {
    if request.name.trim().is_empty() {
        return Err(PurchaseError::MissingField("name"));
    }
    if request.phone.trim().is_empty() {
        return Err(PurchaseError::MissingField("phone"));
    }
    if request.email.trim().is_empty() {
        return Err(PurchaseError::MissingField("email"));
    }
    if request.address.trim().is_empty() {
        return Err(PurchaseError::MissingField("address"));
    }
    if request.province.trim().is_empty() {
        return Err(PurchaseError::MissingField("province"));
    }
    if request.district.trim().is_empty() {
        return Err(PurchaseError::MissingField("district"));
    }
    if request.ward.trim().is_empty() {
        return Err(PurchaseError::MissingField("ward"));
    }
    if request.quantity <= 0 {
        return Err(PurchaseError::InvalidQuantity);
    }
    Ok(())
}

/// Nanosecond clock avoids collisions under high traffic; the database's
/// unique index on `payment_order_code` is the actual guarantee.
fn mint_order_code() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is after the unix epoch")
        .as_nanos() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PurchaseRequest {
        PurchaseRequest {
            quantity: 1,
            name: "Jane".to_string(),
            phone: "0900000000".to_string(),
            email: "jane@example.com".to_string(),
            address: "1 Main St".to_string(),
            province: "HCM".to_string(),
            district: "D1".to_string(),
            ward: "W1".to_string(),
        }
    }

    #[test]
    fn validation_order_is_deterministic() {
        let mut request = valid_request();
        request.name = "".to_string();
        assert!(matches!(
            validate(&request),
            Err(PurchaseError::MissingField("name"))
        ));

        let mut request = valid_request();
        request.phone = "".to_string();
        assert!(matches!(
            validate(&request),
            Err(PurchaseError::MissingField("phone"))
        ));

        let mut request = valid_request();
        request.quantity = 0;
        assert!(matches!(validate(&request), Err(PurchaseError::InvalidQuantity)));
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate(&valid_request()).is_ok());
    }
}
