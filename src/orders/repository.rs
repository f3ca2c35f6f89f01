use sqlx::{Sqlite, Transaction};

use crate::db::SmartExecutor;

use super::error::OrderError;
use super::models::{Order, OrderStatus};

const PHONE_LOOKUP_LIMIT: i64 = 50;

pub struct OrderRepository<'a> {
    executor: &'a SmartExecutor<'a>,
}

impl<'a> OrderRepository<'a> {
    pub fn new(executor: &'a SmartExecutor<'a>) -> Self {
        Self { executor }
    }

    pub async fn create(
        &self,
        phone: &str,
        shipping_address: &str,
        items: &str,
        payment_method: i64,
        payment_order_code: i64,
        total_amount: i64,
    ) -> Result<i64, OrderError> {
        let result = self
            .executor
            .exec(
                sqlx::query(
                    "INSERT INTO orders (phone, shipping_address, items, payment_method, status, payment_order_code, total_amount)
                     VALUES (?, ?, ?, ?, 'pending', ?, ?)",
                )
                .bind(phone)
                .bind(shipping_address)
                .bind(items)
                .bind(payment_method)
                .bind(payment_order_code)
                .bind(total_amount),
            )
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db_err) if db_err.is_unique_violation() => OrderError::DuplicateOrderCode,
                _ => OrderError::Db(e),
            })?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Order, OrderError> {
        self.executor
            .query_row(
                sqlx::query_as::<_, Order>(
                    "SELECT id, phone, shipping_address, items, payment_method, status, payment_order_code, total_amount, created_at, updated_at
                     FROM orders WHERE id = ?",
                )
                .bind(id),
            )
            .await?
            .ok_or(OrderError::NotFound)
    }

    pub async fn get_by_payment_order_code(&self, order_code: i64) -> Result<Order, OrderError> {
        self.executor
            .query_row(
                sqlx::query_as::<_, Order>(
                    "SELECT id, phone, shipping_address, items, payment_method, status, payment_order_code, total_amount, created_at, updated_at
                     FROM orders WHERE payment_order_code = ?",
                )
                .bind(order_code),
            )
            .await?
            .ok_or(OrderError::NotFound)
    }

    pub async fn list_by_phone(&self, phone: &str) -> Result<Vec<Order>, OrderError> {
        let orders = self
            .executor
            .query(
                sqlx::query_as::<_, Order>(
                    "SELECT id, phone, shipping_address, items, payment_method, status, payment_order_code, total_amount, created_at, updated_at
                     FROM orders WHERE phone = ? ORDER BY created_at DESC LIMIT ?",
                )
                .bind(phone)
                .bind(PHONE_LOOKUP_LIMIT),
            )
            .await?;
        Ok(orders)
    }

    pub async fn update_status(&self, id: i64, status: OrderStatus) -> Result<(), OrderError> {
        let result = self
            .executor
            .exec(
                sqlx::query(
                    "UPDATE orders SET status = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = ?",
                )
                .bind(status.as_str())
                .bind(id),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(OrderError::NotFound);
        }
        Ok(())
    }

    pub async fn update_status_tx(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        let result = sqlx::query(
            "UPDATE orders SET status = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(OrderError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::db::Database;

    async fn empty_db() -> Database {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::connect(path.to_str().unwrap(), 4, Duration::from_secs(5))
            .await
            .unwrap();
        db.run_migrations().await.unwrap();
        std::mem::forget(dir);
        db
    }

    #[tokio::test]
    async fn create_and_fetch_roundtrip() {
        let db = empty_db().await;
        let executor = db.executor();
        let repo = OrderRepository::new(&executor);

        let id = repo
            .create("0900000000", "{}", "[]", 1, 1234, 50000)
            .await
            .unwrap();

        let order = repo.get_by_id(id).await.unwrap();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.payment_order_code, Some(1234));
    }

    #[tokio::test]
    async fn duplicate_payment_order_code_rejected() {
        let db = empty_db().await;
        let executor = db.executor();
        let repo = OrderRepository::new(&executor);

        repo.create("0900000000", "{}", "[]", 1, 1234, 50000)
            .await
            .unwrap();

        let result = repo.create("0900000001", "{}", "[]", 1, 1234, 50000).await;
        assert!(matches!(result, Err(OrderError::DuplicateOrderCode)));
    }
}
