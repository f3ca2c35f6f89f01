use sqlx::{Sqlite, Transaction};

use crate::db::SmartExecutor;

use super::error::SymbicodeError;
use super::models::{Symbicode, SymbicodeRow};

pub struct SymbicodeRepository<'a> {
    executor: &'a SmartExecutor<'a>,
}

impl<'a> SymbicodeRepository<'a> {
    pub fn new(executor: &'a SmartExecutor<'a>) -> Self {
        Self { executor }
    }

    pub async fn create_tx(
        tx: &mut Transaction<'_, Sqlite>,
        code: &uuid::Uuid,
        secret_key: &str,
        product_id: i64,
        order_id: Option<i64>,
    ) -> Result<i64, SymbicodeError> {
        let result = sqlx::query(
            "INSERT INTO symbicodes (code, secret_key, product_id, order_id, is_activated)
             VALUES (?, ?, ?, ?, 0)",
        )
        .bind(code.as_bytes().as_slice())
        .bind(secret_key)
        .bind(product_id)
        .bind(order_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_code(&self, code: &uuid::Uuid) -> Result<Symbicode, SymbicodeError> {
        let row = self
            .executor
            .query_row(
                sqlx::query_as::<_, SymbicodeRow>(
                    "SELECT id, code, secret_key, product_id, order_id, is_activated, activated_ip, created_at, activated_at
                     FROM symbicodes WHERE code = ?",
                )
                .bind(code.as_bytes().as_slice()),
            )
            .await?
            .ok_or(SymbicodeError::NotFound)?;

        row.try_into().map_err(|_| SymbicodeError::InvalidFormat)
    }

    /// Activates on first sight; a second activation attempt is a no-op
    /// (the CAS guard on `is_activated = 0` makes it idempotent).
    pub async fn activate(&self, id: i64, activated_ip: Option<&str>) -> Result<bool, SymbicodeError> {
        let result = self
            .executor
            .exec(
                sqlx::query(
                    "UPDATE symbicodes SET is_activated = 1, activated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), activated_ip = ?
                     WHERE id = ? AND is_activated = 0",
                )
                .bind(activated_ip)
                .bind(id),
            )
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn sweep_stale_unactivated(&self, older_than_days: i64) -> Result<u64, SymbicodeError> {
        let result = self
            .executor
            .exec(
                sqlx::query(
                    "UPDATE symbicodes SET is_activated = 1, activated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                     WHERE is_activated = 0 AND created_at <= datetime('now', printf('-%d days', ?))",
                )
                .bind(older_than_days),
            )
            .await?;
        Ok(result.rows_affected())
    }
}
