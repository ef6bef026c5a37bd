//! In-memory ledgers for tests.

use crate::{DbError, LedgerRepository};
use configuration::LedgerTable;
use core_types::TradeRecord;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// A pool over a private in-memory database.
///
/// Each SQLite in-memory connection is its own database, so the pool is pinned
/// to a single connection that is never recycled.
async fn memory_pool() -> Result<SqlitePool, DbError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}

/// Builds a ledger holding exactly `trades`, in the default ledger table.
pub async fn memory_ledger(trades: &[TradeRecord]) -> Result<LedgerRepository, DbError> {
    let pool = memory_pool().await?;
    let table = LedgerTable::default();

    let create = format!(
        r#"
        CREATE TABLE {} (
            strategy TEXT NOT NULL,
            side     TEXT NOT NULL,
            quantity REAL NOT NULL,
            price    REAL NOT NULL
        )
        "#,
        table.sql_identifier()
    );
    sqlx::query(&create).execute(&pool).await?;

    let insert = format!(
        "INSERT INTO {} (strategy, side, quantity, price) VALUES (?, ?, ?, ?)",
        table.sql_identifier()
    );
    for trade in trades {
        sqlx::query(&insert)
            .bind(&trade.strategy)
            .bind(trade.side.as_str())
            .bind(trade.quantity)
            .bind(trade.price)
            .execute(&pool)
            .await?;
    }

    Ok(LedgerRepository::new(pool, table))
}

/// Builds a ledger with untyped columns, filled from a raw SQL `VALUES` list.
///
/// Without declared column types SQLite keeps each value's own storage class,
/// which lets tests hold e.g. an INTEGER strategy next to TEXT ones.
pub async fn memory_ledger_from_rows(values: &str) -> Result<LedgerRepository, DbError> {
    let pool = memory_pool().await?;
    let table = LedgerTable::default();

    let create = format!(
        "CREATE TABLE {} (strategy, side, quantity, price)",
        table.sql_identifier()
    );
    sqlx::query(&create).execute(&pool).await?;

    let insert = format!(
        "INSERT INTO {} (strategy, side, quantity, price) VALUES {}",
        table.sql_identifier(),
        values
    );
    sqlx::query(&insert).execute(&pool).await?;

    Ok(LedgerRepository::new(pool, table))
}

/// Builds a repository whose ledger table does not exist, so every query fails.
pub async fn memory_ledger_without_table() -> Result<LedgerRepository, DbError> {
    let pool = memory_pool().await?;
    Ok(LedgerRepository::new(pool, LedgerTable::default()))
}
