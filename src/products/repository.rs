use thiserror::Error;

use crate::db::SmartExecutor;

use super::models::Product;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

pub struct ProductRepository<'a> {
    executor: &'a SmartExecutor<'a>,
}

impl<'a> ProductRepository<'a> {
    pub fn new(executor: &'a SmartExecutor<'a>) -> Self {
        Self { executor }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product, ProductError> {
        self.executor
            .query_row(
                sqlx::query_as::<_, Product>(
                    "SELECT id, name, price, description FROM products WHERE id = ?",
                )
                .bind(id),
            )
            .await?
            .ok_or(ProductError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ProductError> {
        let products = self
            .executor
            .query(sqlx::query_as::<_, Product>(
                "SELECT id, name, price, description FROM products ORDER BY id ASC",
            ))
            .await?;
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::db::Database;

    async fn seeded_db() -> Database {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::connect(path.to_str().unwrap(), 4, Duration::from_secs(5))
            .await
            .unwrap();
        db.run_migrations().await.unwrap();
        sqlx::query("INSERT INTO products (id, name, price, description) VALUES (1, 'Hoodie', 50000, 'Limited hoodie')")
            .execute(db.writer())
            .await
            .unwrap();
        std::mem::forget(dir);
        db
    }

    #[tokio::test]
    async fn get_by_id_returns_product() {
        let db = seeded_db().await;
        let executor = db.executor();
        let repo = ProductRepository::new(&executor);
        let product = repo.get_by_id(1).await.unwrap();
        assert_eq!(product.name, "Hoodie");
        assert_eq!(product.price, 50000);
    }

    #[tokio::test]
    async fn get_by_id_missing_returns_not_found() {
        let db = seeded_db().await;
        let executor = db.executor();
        let repo = ProductRepository::new(&executor);
        assert!(matches!(
            repo.get_by_id(999).await,
            Err(ProductError::NotFound)
        ));
    }
}
