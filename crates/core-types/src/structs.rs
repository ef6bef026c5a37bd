use crate::enums::TradeSide;
use serde::{Deserialize, Serialize};

/// A single row of the trade ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Identifier of the strategy that executed the trade.
    pub strategy: String,
    pub side: TradeSide,
    /// Physical volume in MW. Never negative.
    pub quantity: f64,
    /// Price in euro per unit.
    pub price: f64,
}

impl TradeRecord {
    pub fn new(strategy: impl Into<String>, side: TradeSide, quantity: f64, price: f64) -> Self {
        Self {
            strategy: strategy.into(),
            side,
            quantity,
            price,
        }
    }

    /// Signed cash flow of this trade: proceeds for a sell, cost (negative) for a buy.
    pub fn cash_flow(&self) -> f64 {
        self.side.cash_flow_sign() * self.quantity * self.price
    }
}
