//! Gateway webhook payload shape and signature verification. The handler in
//! `gateway::handlers` reads the raw body once, verifies it, then
//! deserializes that same buffer.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[allow(dead_code)]
    pub code: String,
    #[allow(dead_code)]
    pub desc: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    #[serde(rename = "orderCode")]
    pub order_code: i64,
    #[allow(dead_code)]
    pub amount: i64,
    pub status: String,
    #[allow(dead_code)]
    pub description: Option<String>,
    #[allow(dead_code)]
    pub metadata: Option<serde_json::Value>,
    #[serde(rename = "paymentMethod")]
    #[allow(dead_code)]
    pub payment_method: Option<String>,
}

impl WebhookPayload {
    pub fn is_paid(&self) -> bool {
        self.data.status == "PAID"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_payos_shaped_payload() {
        let raw = r#"{
            "code": "00",
            "desc": "success",
            "data": {
                "orderCode": 1234567890,
                "amount": 50000,
                "status": "PAID",
                "description": "Drop 1",
                "metadata": null,
                "paymentMethod": "qr"
            }
        }"#;
        let payload: WebhookPayload = serde_json::from_str(raw).unwrap();
        assert!(payload.is_paid());
        assert_eq!(payload.data.order_code, 1234567890);
    }

    #[test]
    fn non_paid_status_is_not_paid() {
        let raw = r#"{"code":"00","desc":"pending","data":{"orderCode":1,"amount":1,"status":"PENDING"}}"#;
        let payload: WebhookPayload = serde_json::from_str(raw).unwrap();
        assert!(!payload.is_paid());
    }
}
