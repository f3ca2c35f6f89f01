use std::sync::Arc;
use std::time::Duration;

use limited_drop_platform::config::AppConfig;
use limited_drop_platform::db::Database;
use limited_drop_platform::gateway::AppState;
use limited_drop_platform::logging;
use limited_drop_platform::maintenance;
use limited_drop_platform::notifications::email::LoggingEmailSink;
use limited_drop_platform::notifications::gateway_client::{HttpPaymentGateway, MockPaymentGateway};
use limited_drop_platform::notifications::sheets::LoggingSpreadsheetSink;
use limited_drop_platform::notifications::{NotificationQueue, PaymentGateway};

/// spec.md §5: outbound payment-gateway calls are wrapped with a 30-second
/// deadline so a hung gateway never blocks a purchase request indefinitely.
const PAYMENT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let _log_guard = logging::init_logging(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), git_hash = env!("GIT_HASH"), "starting");

    let db = Arc::new(Database::connect(&config.db_path, config.reader_pool_size, config.busy_timeout).await?);
    db.run_migrations().await?;

    let gateway: Arc<dyn PaymentGateway> = if config.gateway_is_mock() {
        tracing::warn!("PAYOS_CLIENT_ID/PAYOS_API_KEY not set, using mock payment gateway");
        Arc::new(MockPaymentGateway {
            frontend_url: config.frontend_url.clone(),
        })
    } else {
        Arc::new(HttpPaymentGateway {
            client: reqwest::Client::builder()
                .timeout(PAYMENT_GATEWAY_TIMEOUT)
                .build()?,
            checkout_url: config.payos_checkout_url.clone(),
            client_id: config.payos_client_id.clone(),
            api_key: config.payos_api_key.clone(),
            checksum_key: config.payos_checksum_key.clone(),
        })
    };

    let notifications = NotificationQueue::new();
    notifications
        .clone()
        .spawn_drain_loop(Arc::new(LoggingEmailSink), Arc::new(LoggingSpreadsheetSink));

    maintenance::spawn_symbicode_sweep(db.clone());

    let state = Arc::new(AppState::new(
        db,
        gateway,
        notifications,
        Arc::new(LoggingEmailSink),
        Arc::new(LoggingSpreadsheetSink),
        config.frontend_url.clone(),
        if config.gateway_is_mock() {
            String::new()
        } else {
            config.payos_checksum_key.clone()
        },
    ));

    limited_drop_platform::gateway::run_server(&config.host, config.port, state).await
}
