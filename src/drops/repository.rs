use crate::db::SmartExecutor;

use super::error::DropError;
use super::models::Drop;

pub struct DropRepository<'a> {
    executor: &'a SmartExecutor<'a>,
}

impl<'a> DropRepository<'a> {
    pub fn new(executor: &'a SmartExecutor<'a>) -> Self {
        Self { executor }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Drop, DropError> {
        self.executor
            .query_row(
                sqlx::query_as::<_, Drop>(
                    "SELECT id, product_id, name, start_time, end_time, total_stock, drop_size, sold, is_active
                     FROM limited_drops WHERE id = ? AND is_active = 1",
                )
                .bind(id),
            )
            .await?
            .ok_or(DropError::NotFound)
    }

    pub async fn list_active(&self) -> Result<Vec<Drop>, DropError> {
        let drops = self
            .executor
            .query(sqlx::query_as::<_, Drop>(
                "SELECT id, product_id, name, start_time, end_time, total_stock, drop_size, sold, is_active
                 FROM limited_drops WHERE is_active = 1 ORDER BY start_time ASC",
            ))
            .await?;
        Ok(drops)
    }

    /// Atomic conditional increment: only takes effect when the resulting
    /// `sold` still fits under `total_stock`. `rows_affected() == 0` means
    /// someone else claimed the last unit first.
    pub async fn increment_sold(&self, id: i64, quantity: i64) -> Result<(), DropError> {
        let result = self
            .executor
            .exec(
                sqlx::query(
                    "UPDATE limited_drops SET sold = sold + ?
                     WHERE id = ? AND is_active = 1 AND sold + ? <= total_stock",
                )
                .bind(quantity)
                .bind(id)
                .bind(quantity),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DropError::SoldOut);
        }
        Ok(())
    }

    pub async fn increment_sold_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        id: i64,
        quantity: i64,
    ) -> Result<(), DropError> {
        let result = sqlx::query(
            "UPDATE limited_drops SET sold = sold + ?
             WHERE id = ? AND is_active = 1 AND sold + ? <= total_stock",
        )
        .bind(quantity)
        .bind(id)
        .bind(quantity)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DropError::SoldOut);
        }
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::db::Database;

    async fn seeded_db(total_stock: i64, drop_size: i64) -> Database {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::connect(path.to_str().unwrap(), 4, Duration::from_secs(5))
            .await
            .unwrap();
        db.run_migrations().await.unwrap();
        sqlx::query("INSERT INTO products (id, name, price) VALUES (1, 'Hoodie', 50000)")
            .execute(db.writer())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO limited_drops (id, product_id, name, start_time, total_stock, drop_size, sold, is_active)
             VALUES (1, 1, 'Drop', '2000-01-01T00:00:00Z', ?, ?, 0, 1)",
        )
        .bind(total_stock)
        .bind(drop_size)
        .execute(db.writer())
        .await
        .unwrap();
        std::mem::forget(dir);
        db
    }

    #[tokio::test]
    async fn increment_sold_respects_total_stock() {
        let db = seeded_db(1, 10).await;
        let executor = db.executor();
        let repo = DropRepository::new(&executor);

        repo.increment_sold(1, 1).await.unwrap();
        assert!(matches!(
            repo.increment_sold(1, 1).await,
            Err(DropError::SoldOut)
        ));
    }

    #[tokio::test]
    async fn concurrent_increments_never_oversell() {
        let db = Arc::new(seeded_db(10, 1000).await);

        let mut handles = Vec::new();
        for _ in 0..50 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                let executor = db.executor();
                let repo = DropRepository::new(&executor);
                repo.increment_sold(1, 1).await
            }));
        }

        let mut ok = 0;
        let mut sold_out = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => ok += 1,
                Err(DropError::SoldOut) => sold_out += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, 10);
        assert_eq!(sold_out, 40);

        let executor = db.executor();
        let repo = DropRepository::new(&executor);
        let drop = repo.get_by_id(1).await.unwrap();
        assert_eq!(drop.sold, 10);
    }
}
