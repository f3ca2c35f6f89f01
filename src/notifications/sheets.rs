use async_trait::async_trait;

#[async_trait]
pub trait SpreadsheetSink: Send + Sync {
    async fn append_order(&self, order_number: &str, phone: &str, total_amount: i64);
}

pub struct LoggingSpreadsheetSink;

#[async_trait]
impl SpreadsheetSink for LoggingSpreadsheetSink {
    async fn append_order(&self, order_number: &str, phone: &str, total_amount: i64) {
        tracing::info!(order_number, phone, total_amount, "order appended to spreadsheet (logged, not sent)");
    }
}
