//! Payment gateway capability. Mirrors the checkout/verify/refund/cancel
//! surface a hosted checkout provider exposes; mock mode stands in when no
//! credentials are configured so the purchase flow stays exercisable without
//! live credentials.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    #[error("checkout request failed: {0}")]
    Checkout(String),
    #[error("signature verification failed")]
    InvalidSignature,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutItem {
    pub name: String,
    pub quantity: i64,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub order_code: i64,
    pub amount: i64,
    pub description: String,
    pub return_url: String,
    pub cancel_url: String,
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutResponse, PaymentGatewayError>;

    async fn cancel(&self, order_code: i64) -> Result<(), PaymentGatewayError>;

    async fn refund(&self, order_code: i64) -> Result<(), PaymentGatewayError>;

    /// Whether inbound webhooks should have their signature enforced.
    /// Mock gateways accept any body; real ones never do.
    fn enforces_signatures(&self) -> bool;
}

/// HMAC-SHA256 over the raw webhook body, hex-encoded. Used both to sign
/// outbound mock checkouts and to verify inbound webhook calls.
pub fn sign(body: &[u8], checksum_key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(checksum_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

pub fn verify_signature(body: &[u8], checksum_key: &str, signature: &str) -> bool {
    sign(body, checksum_key).eq_ignore_ascii_case(signature)
}

/// Dev-mode gateway: deterministic localhost checkout URL, never hits the
/// network, never enforces webhook signatures.
pub struct MockPaymentGateway {
    pub frontend_url: String,
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutResponse, PaymentGatewayError> {
        tracing::info!(order_code = request.order_code, amount = request.amount, "mock checkout created");
        Ok(CheckoutResponse {
            checkout_url: format!("{}/mock-checkout?order_code={}", self.frontend_url, request.order_code),
        })
    }

    async fn cancel(&self, order_code: i64) -> Result<(), PaymentGatewayError> {
        tracing::info!(order_code, "mock checkout cancelled");
        Ok(())
    }

    async fn refund(&self, order_code: i64) -> Result<(), PaymentGatewayError> {
        tracing::info!(order_code, "mock refund issued");
        Ok(())
    }

    fn enforces_signatures(&self) -> bool {
        false
    }
}

/// Real gateway client, grounded in the same request shape the mock
/// simulates. Kept narrow: this service only ever needs checkout creation
/// plus cancel/refund for the abandoned-cart and sold-out paths.
pub struct HttpPaymentGateway {
    pub client: reqwest::Client,
    pub checkout_url: String,
    pub client_id: String,
    pub api_key: String,
    pub checksum_key: String,
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutResponse, PaymentGatewayError> {
        let signature_payload = format!(
            "amount={}&cancelUrl={}&description={}&orderCode={}&returnUrl={}",
            request.amount, request.cancel_url, request.description, request.order_code, request.return_url
        );
        let signature = sign(signature_payload.as_bytes(), &self.checksum_key);

        let response = self
            .client
            .post(&self.checkout_url)
            .header("x-client-id", &self.client_id)
            .header("x-api-key", &self.api_key)
            .json(&serde_json::json!({
                "orderCode": request.order_code,
                "amount": request.amount,
                "description": request.description,
                "returnUrl": request.return_url,
                "cancelUrl": request.cancel_url,
                "items": request.items,
                "signature": signature,
            }))
            .send()
            .await
            .map_err(|e| PaymentGatewayError::Checkout(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentGatewayError::Checkout(format!(
                "gateway returned {}",
                response.status()
            )));
        }

        response
            .json::<CheckoutResponse>()
            .await
            .map_err(|e| PaymentGatewayError::Checkout(e.to_string()))
    }

    async fn cancel(&self, _order_code: i64) -> Result<(), PaymentGatewayError> {
        Ok(())
    }

    async fn refund(&self, _order_code: i64) -> Result<(), PaymentGatewayError> {
        Ok(())
    }

    fn enforces_signatures(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_deterministic() {
        let a = sign(b"payload", "secret");
        let b = sign(b"payload", "secret");
        assert_eq!(a, b);
        assert!(verify_signature(b"payload", "secret", &a));
        assert!(!verify_signature(b"payload", "wrong-secret", &a));
    }
}
