//! Environment-driven configuration for the drop-sale service.
//!
//! Every field has a development-friendly default except the bind port, which
//! fails fast when malformed so misconfiguration never runs silently.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    pub db_path: String,
    pub reader_pool_size: u32,
    pub busy_timeout: Duration,

    pub frontend_url: String,

    /// Empty when the real gateway is not configured; selects mock mode.
    pub payos_client_id: String,
    pub payos_api_key: String,
    pub payos_checksum_key: String,
    pub payos_checkout_url: String,

    pub log_dir: String,
    pub log_file: String,
    pub log_level: String,
    pub rotation: String,
    pub use_json: bool,
    pub enable_tracing: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port: u16 = env_or("PORT", "8080").parse()?;

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port,

            db_path: env_or("DB_PATH", "data/drops.db"),
            reader_pool_size: env_or("DB_READER_POOL_SIZE", "8").parse().unwrap_or(8),
            busy_timeout: Duration::from_millis(
                env_or("DB_BUSY_TIMEOUT_MS", "5000").parse().unwrap_or(5000),
            ),

            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),

            payos_client_id: env::var("PAYOS_CLIENT_ID").unwrap_or_default(),
            payos_api_key: env::var("PAYOS_API_KEY").unwrap_or_default(),
            payos_checksum_key: env::var("PAYOS_CHECKSUM_KEY").unwrap_or_default(),
            payos_checkout_url: env_or(
                "PAYOS_CHECKOUT_URL",
                "https://api-merchant.payos.vn/v2/payment-requests",
            ),

            log_dir: env_or("LOG_DIR", "logs"),
            log_file: env_or("LOG_FILE", "limited-drop.log"),
            log_level: env_or("LOG_LEVEL", "info"),
            rotation: env_or("LOG_ROTATION", "daily"),
            use_json: env_or("LOG_JSON", "false").parse().unwrap_or(false),
            enable_tracing: env_or("ENABLE_TRACING", "true").parse().unwrap_or(true),
        })
    }

    pub fn gateway_is_mock(&self) -> bool {
        self.payos_client_id.is_empty() || self.payos_api_key.is_empty()
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
