//! Routes each statement to the writer or reader pool without parsing SQL:
//! callers build a query with `sqlx::query`/`sqlx::query_as` and hand it to
//! the method that matches what they're about to run. Mirrors
//! `original_source`'s `smart_executor.go` (`Query`/`QueryRow`/`Exec`/`Begin`)
//! one-for-one; routing is enforced by this type, not by caller discipline.

use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, SqlitePool, Transaction};

pub struct SmartExecutor<'a> {
    writer: &'a SqlitePool,
    reader: &'a SqlitePool,
}

impl<'a> SmartExecutor<'a> {
    pub fn new(writer: &'a SqlitePool, reader: &'a SqlitePool) -> Self {
        Self { writer, reader }
    }

    /// Routes a `SELECT` returning zero or more rows to the reader pool.
    pub async fn query<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> Result<Vec<O>, sqlx::Error>
    where
        O: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        query.fetch_all(self.reader).await
    }

    /// Routes a `SELECT` expected to return zero or one rows to the reader
    /// pool.
    pub async fn query_row<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> Result<Option<O>, sqlx::Error>
    where
        O: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        query.fetch_optional(self.reader).await
    }

    /// Routes an `INSERT`/`UPDATE`/`DELETE` to the writer pool.
    pub async fn exec<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Result<SqliteQueryResult, sqlx::Error> {
        query.execute(self.writer).await
    }

    /// Start a transaction. Transactions always go through the writer: the
    /// single-connection writer pool is what gives this engine serialized
    /// mutations without relying on SQLite's own locking to arbitrate.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.writer.begin().await
    }
}
