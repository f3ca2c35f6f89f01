use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptOutcome {
    Winner,
    Loser,
}

#[async_trait]
pub trait EmailSink: Send + Sync {
    async fn send_order_confirmation(&self, to: &str, order_number: &str);

    async fn send_symbicode_receipt(&self, to: &str, phone: &str, outcome: ReceiptOutcome, symbicode: Option<&str>);
}

/// Default sink: logs instead of sending. Used whenever no email provider
/// is configured, and by every test that doesn't care about delivery.
pub struct LoggingEmailSink;

#[async_trait]
impl EmailSink for LoggingEmailSink {
    async fn send_order_confirmation(&self, to: &str, order_number: &str) {
        tracing::info!(to, order_number, "order confirmation email (logged, not sent)");
    }

    async fn send_symbicode_receipt(
        &self,
        to: &str,
        phone: &str,
        outcome: ReceiptOutcome,
        symbicode: Option<&str>,
    ) {
        tracing::info!(
            to,
            phone,
            outcome = ?outcome,
            symbicode = symbicode.unwrap_or("N/A"),
            "symbicode receipt email (logged, not sent)"
        );
    }
}
