//! Split writer/reader SQLite engine.
//!
//! A single on-disk SQLite file is opened twice: once through a pool capped
//! at one connection (the writer, serializing every mutation) and once
//! through a pool sized for concurrent reads (the reader). WAL journaling
//! lets readers proceed without blocking on the writer's transaction.

pub mod executor;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

pub use executor::SmartExecutor;

#[derive(Clone)]
pub struct Database {
    writer: SqlitePool,
    reader: SqlitePool,
}

impl Database {
    pub async fn connect(
        db_path: &str,
        reader_pool_size: u32,
        busy_timeout: Duration,
    ) -> anyhow::Result<Self> {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connect_options = SqliteConnectOptions::from_str(&format!("sqlite://{db_path}"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(busy_timeout);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(connect_options.clone())
            .await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(reader_pool_size.max(1))
            .connect_with(connect_options)
            .await?;

        tracing::info!(db_path, reader_pool_size, "sqlite engine connected");

        Ok(Self { writer, reader })
    }

    pub fn executor(&self) -> SmartExecutor<'_> {
        SmartExecutor::new(&self.writer, &self.reader)
    }

    pub fn writer(&self) -> &SqlitePool {
        &self.writer
    }

    pub fn reader(&self) -> &SqlitePool {
        &self.reader
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.writer).await?;
        Ok(())
    }

    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.reader).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_and_migrates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::connect(path.to_str().unwrap(), 4, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(db.health_check().await);
        db.run_migrations().await.unwrap();
    }
}
