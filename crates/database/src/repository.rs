use crate::DbError;
use configuration::LedgerTable;
use core_types::TradeSide;
use sqlx::sqlite::SqlitePool;

/// The `LedgerRepository` provides the read-only queries over the trade ledger.
///
/// Every method is a fresh read against the current contents of the table.
/// Aggregates over no rows are SQL `NULL` and come back as `0.0`.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
    table: LedgerTable,
}

impl LedgerRepository {
    /// Creates a new `LedgerRepository` bound to one ledger table.
    pub fn new(pool: SqlitePool, table: LedgerTable) -> Self {
        Self { pool, table }
    }

    /// The table every query of this repository runs against.
    pub fn ledger_table(&self) -> LedgerTable {
        self.table
    }

    /// Fetches every distinct strategy identifier present in the ledger.
    /// The order is whatever the storage engine returns.
    ///
    /// SQLite columns are dynamically typed, so identifiers stored as numbers
    /// are read back as their text form. `NULL` strategies are skipped.
    pub async fn distinct_strategies(&self) -> Result<Vec<String>, DbError> {
        let query = format!(
            "SELECT DISTINCT CAST(strategy AS TEXT) FROM {}",
            self.table.sql_identifier()
        );
        tracing::debug!(table = %self.table, "Fetching distinct strategies.");

        let strategies: Vec<Option<String>> =
            sqlx::query_scalar(&query).fetch_all(&self.pool).await?;

        Ok(strategies.into_iter().flatten().collect())
    }

    /// Sums the traded quantity over all records on one side of the book.
    pub async fn total_quantity(&self, side: TradeSide) -> Result<f64, DbError> {
        let query = format!(
            "SELECT CAST(SUM(quantity) AS REAL) FROM {} WHERE side = ?",
            self.table.sql_identifier()
        );
        tracing::debug!(table = %self.table, %side, "Summing traded quantity.");

        let total: Option<f64> = sqlx::query_scalar(&query)
            .bind(side.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(total.unwrap_or(0.0))
    }

    /// Sums the signed cash flow of one strategy's trades: `quantity * price`
    /// for sells, its negation for buys.
    pub async fn signed_cash_flow(&self, strategy: &str) -> Result<f64, DbError> {
        let query = format!(
            r#"
            SELECT CAST(SUM(
                CASE
                    WHEN side = ? THEN (quantity * price)
                    WHEN side = ? THEN -(quantity * price)
                END
            ) AS REAL)
            FROM {}
            WHERE strategy = ?
            "#,
            self.table.sql_identifier()
        );
        tracing::debug!(table = %self.table, strategy, "Summing signed cash flow.");

        let total: Option<f64> = sqlx::query_scalar(&query)
            .bind(TradeSide::Sell.as_str())
            .bind(TradeSide::Buy.as_str())
            .bind(strategy)
            .fetch_one(&self.pool)
            .await?;

        Ok(total.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{memory_ledger, memory_ledger_from_rows, memory_ledger_without_table};
    use core_types::TradeRecord;
    use std::collections::HashSet;

    fn sample_trades() -> Vec<TradeRecord> {
        vec![
            TradeRecord::new("strategy_1", TradeSide::Buy, 5.0, 40.0),
            TradeRecord::new("strategy_1", TradeSide::Sell, 3.0, 45.0),
            TradeRecord::new("strategy_2", TradeSide::Buy, 7.0, 38.5),
        ]
    }

    #[tokio::test]
    async fn distinct_strategies_lists_each_strategy_once() {
        let repo = memory_ledger(&sample_trades()).await.unwrap();
        let strategies: HashSet<String> =
            repo.distinct_strategies().await.unwrap().into_iter().collect();
        let expected: HashSet<String> = ["strategy_1", "strategy_2"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(strategies, expected);
    }

    #[tokio::test]
    async fn total_quantity_sums_one_side() {
        let repo = memory_ledger(&sample_trades()).await.unwrap();
        assert_eq!(repo.total_quantity(TradeSide::Buy).await.unwrap(), 12.0);
        assert_eq!(repo.total_quantity(TradeSide::Sell).await.unwrap(), 3.0);
    }

    #[tokio::test]
    async fn empty_ledger_aggregates_to_zero() {
        let repo = memory_ledger(&[]).await.unwrap();
        assert!(repo.distinct_strategies().await.unwrap().is_empty());
        assert_eq!(repo.total_quantity(TradeSide::Buy).await.unwrap(), 0.0);
        assert_eq!(repo.signed_cash_flow("strategy_1").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn signed_cash_flow_nets_sells_against_buys() {
        let repo = memory_ledger(&sample_trades()).await.unwrap();
        // 3 * 45 - 5 * 40
        assert_eq!(repo.signed_cash_flow("strategy_1").await.unwrap(), -65.0);
        assert_eq!(repo.signed_cash_flow("strategy_2").await.unwrap(), -269.5);
    }

    #[tokio::test]
    async fn strategy_is_bound_not_interpolated() {
        let repo = memory_ledger(&sample_trades()).await.unwrap();
        let flow = repo
            .signed_cash_flow("strategy_1' OR '1'='1")
            .await
            .unwrap();
        assert_eq!(flow, 0.0);
    }

    #[tokio::test]
    async fn non_text_strategies_do_not_break_the_strategy_list() {
        let repo = memory_ledger_from_rows(
            "('strategy_1', 'buy', 5, 2), ('strategy_1', 'sell', 3, 4), (NULL, 'buy', 1, 1), (7, 'sell', 1, 1)",
        )
        .await
        .unwrap();

        let strategies: HashSet<String> =
            repo.distinct_strategies().await.unwrap().into_iter().collect();
        let expected: HashSet<String> = ["strategy_1", "7"].into_iter().map(String::from).collect();
        assert_eq!(strategies, expected);

        assert_eq!(repo.signed_cash_flow("strategy_1").await.unwrap(), 2.0);
        assert_eq!(repo.total_quantity(TradeSide::Buy).await.unwrap(), 6.0);
    }

    #[tokio::test]
    async fn missing_table_surfaces_query_error() {
        let repo = memory_ledger_without_table().await.unwrap();
        assert_eq!(repo.ledger_table(), LedgerTable::Epex12201213);
        assert!(matches!(
            repo.total_quantity(TradeSide::Sell).await,
            Err(DbError::QueryError(_))
        ));
    }
}
