use crate::error::AnalyticsError;
use crate::report::{PnlReport, VolumeReport};
use core_types::TradeSide;
use database::LedgerRepository;

/// Computes trading metrics over the trade ledger.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    ledger: LedgerRepository,
}

impl MetricsEngine {
    pub fn new(ledger: LedgerRepository) -> Self {
        Self { ledger }
    }

    /// The repository the metrics are computed from.
    pub fn ledger(&self) -> &LedgerRepository {
        &self.ledger
    }

    /// Every strategy identifier currently present in the ledger.
    pub async fn available_strategies(&self) -> Result<Vec<String>, AnalyticsError> {
        Ok(self.ledger.distinct_strategies().await?)
    }

    /// Total quantity bought, in MW. Zero when there are no buys.
    pub async fn total_buy_volume(&self) -> Result<f64, AnalyticsError> {
        self.total_volume(TradeSide::Buy).await
    }

    /// Total quantity sold, in MW. Zero when there are no sells.
    pub async fn total_sell_volume(&self) -> Result<f64, AnalyticsError> {
        self.total_volume(TradeSide::Sell).await
    }

    pub async fn total_volume(&self, side: TradeSide) -> Result<f64, AnalyticsError> {
        Ok(self.ledger.total_quantity(side).await?)
    }

    /// Profit-and-loss of `strategy` in euro: sell proceeds minus buy cost.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::StrategyNotFound` if the strategy does not appear in the
    /// ledger, carrying every strategy that does.
    pub async fn compute_pnl(&self, strategy: &str) -> Result<f64, AnalyticsError> {
        let available = self.ledger.distinct_strategies().await?;
        if !available.iter().any(|s| s == strategy) {
            tracing::warn!(strategy, "PnL requested for unknown strategy.");
            return Err(AnalyticsError::StrategyNotFound {
                strategy: strategy.to_string(),
                available,
            });
        }

        Ok(self.ledger.signed_cash_flow(strategy).await?)
    }

    /// `compute_pnl`, stamped with the current time.
    pub async fn pnl_report(&self, strategy: &str) -> Result<PnlReport, AnalyticsError> {
        let value = self.compute_pnl(strategy).await?;
        Ok(PnlReport::new(strategy, value))
    }

    pub async fn volume_report(&self, side: TradeSide) -> Result<VolumeReport, AnalyticsError> {
        let value = self.total_volume(side).await?;
        Ok(VolumeReport::new(side, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TradeRecord;
    use database::testkit::{memory_ledger, memory_ledger_from_rows, memory_ledger_without_table};
    use std::collections::HashSet;

    async fn engine_with(trades: &[TradeRecord]) -> MetricsEngine {
        MetricsEngine::new(memory_ledger(trades).await.unwrap())
    }

    #[tokio::test]
    async fn volumes_sum_each_side() {
        let engine = engine_with(&[
            TradeRecord::new("A", TradeSide::Buy, 5.0, 10.0),
            TradeRecord::new("B", TradeSide::Buy, 7.0, 11.0),
            TradeRecord::new("A", TradeSide::Sell, 3.0, 12.0),
        ])
        .await;

        assert_eq!(engine.total_buy_volume().await.unwrap(), 12.0);
        assert_eq!(engine.total_sell_volume().await.unwrap(), 3.0);
    }

    #[tokio::test]
    async fn volume_without_matching_side_is_zero() {
        let engine = engine_with(&[TradeRecord::new("A", TradeSide::Sell, 4.0, 10.0)]).await;
        assert_eq!(engine.total_buy_volume().await.unwrap(), 0.0);

        let engine = engine_with(&[TradeRecord::new("A", TradeSide::Buy, 4.0, 10.0)]).await;
        assert_eq!(engine.total_sell_volume().await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn pnl_is_sell_proceeds_minus_buy_cost() {
        let trades = [
            TradeRecord::new("S", TradeSide::Buy, 10.0, 2.0),
            TradeRecord::new("S", TradeSide::Sell, 10.0, 3.0),
        ];
        let engine = engine_with(&trades).await;

        let pnl = engine.compute_pnl("S").await.unwrap();
        assert_eq!(pnl, 10.0);
        assert_eq!(pnl, trades.iter().map(TradeRecord::cash_flow).sum::<f64>());
    }

    #[tokio::test]
    async fn pnl_only_counts_the_requested_strategy() {
        let engine = engine_with(&[
            TradeRecord::new("S", TradeSide::Sell, 2.0, 50.0),
            TradeRecord::new("T", TradeSide::Buy, 100.0, 50.0),
        ])
        .await;
        assert_eq!(engine.compute_pnl("S").await.unwrap(), 100.0);
        assert_eq!(engine.compute_pnl("T").await.unwrap(), -5000.0);
    }

    #[tokio::test]
    async fn unknown_strategy_reports_every_valid_one() {
        let engine = engine_with(&[
            TradeRecord::new("strategy_1", TradeSide::Buy, 1.0, 1.0),
            TradeRecord::new("strategy_2", TradeSide::Sell, 1.0, 1.0),
            TradeRecord::new("strategy_2", TradeSide::Buy, 1.0, 1.0),
        ])
        .await;

        match engine.compute_pnl("strategy_3").await {
            Err(AnalyticsError::StrategyNotFound {
                strategy,
                available,
            }) => {
                assert_eq!(strategy, "strategy_3");
                let available: HashSet<_> = available.into_iter().collect();
                let expected: HashSet<_> = engine
                    .available_strategies()
                    .await
                    .unwrap()
                    .into_iter()
                    .collect();
                assert_eq!(available, expected);
                assert_eq!(available.len(), 2);
            }
            other => panic!("expected StrategyNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_ledger_has_no_valid_strategy() {
        let engine = engine_with(&[]).await;
        assert!(matches!(
            engine.compute_pnl("S").await,
            Err(AnalyticsError::StrategyNotFound { available, .. }) if available.is_empty()
        ));
    }

    #[tokio::test]
    async fn repeated_calls_return_identical_values() {
        let engine = engine_with(&[
            TradeRecord::new("S", TradeSide::Buy, 0.1, 0.2),
            TradeRecord::new("S", TradeSide::Sell, 0.3, 0.7),
        ])
        .await;

        let first = engine.compute_pnl("S").await.unwrap();
        let second = engine.compute_pnl("S").await.unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[tokio::test]
    async fn reports_carry_units_and_monotonic_capture_times() {
        let engine = engine_with(&[TradeRecord::new("S", TradeSide::Sell, 1.0, 5.0)]).await;

        let first = engine.pnl_report("S").await.unwrap();
        let second = engine.pnl_report("S").await.unwrap();
        assert_eq!(first.value, 5.0);
        assert!(second.capture_time >= first.capture_time);

        let volume = engine.volume_report(TradeSide::Sell).await.unwrap();
        assert_eq!(volume.value, 1.0);
        assert_eq!(volume.unit.as_str(), "MW");
    }

    #[tokio::test]
    async fn pnl_survives_numeric_strategy_rows() {
        let ledger = memory_ledger_from_rows(
            "('strategy_1', 'buy', 5, 2), ('strategy_1', 'sell', 3, 4), (NULL, 'buy', 1, 1), (7, 'sell', 1, 1)",
        )
        .await
        .unwrap();
        let engine = MetricsEngine::new(ledger);

        assert_eq!(engine.compute_pnl("strategy_1").await.unwrap(), 2.0);
        assert!(matches!(
            engine.compute_pnl("strategy_2").await,
            Err(AnalyticsError::StrategyNotFound { available, .. }) if available.len() == 2
        ));
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let engine = MetricsEngine::new(memory_ledger_without_table().await.unwrap());
        assert!(matches!(
            engine.total_buy_volume().await,
            Err(AnalyticsError::Storage(_))
        ));
        assert!(matches!(
            engine.compute_pnl("S").await,
            Err(AnalyticsError::Storage(_))
        ));
    }
}
