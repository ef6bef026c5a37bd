use serde::{Deserialize, Serialize};
use std::fmt;

/// The side of a trade record, as stored in the ledger's `side` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// The literal stored in the ledger for this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }

    /// Sign of the cash flow a trade on this side contributes to PnL.
    /// Selling brings money in, buying pays it out.
    pub fn cash_flow_sign(&self) -> f64 {
        match self {
            TradeSide::Buy => -1.0,
            TradeSide::Sell => 1.0,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit tag attached to every reported metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Cash amounts (PnL).
    #[serde(rename = "euro")]
    Euro,
    /// Physical volume.
    #[serde(rename = "MW")]
    MegaWatt,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Euro => "euro",
            Unit::MegaWatt => "MW",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
