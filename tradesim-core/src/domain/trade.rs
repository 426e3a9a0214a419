//! TradeRecord — an immutable record of a single executed order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Buy,
    Sell,
}

/// A single executed trade.
///
/// Created only by the execution model, consumed by the portfolio ledger.
/// Exactly one record exists per detected signal transition; non-transition
/// dates produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub direction: TradeDirection,
    /// Slippage-adjusted execution price.
    pub fill_price: f64,
    pub shares: u32,
    pub commission: f64,
}

impl TradeRecord {
    /// Gross traded value, before commission.
    pub fn notional(&self) -> f64 {
        self.fill_price * f64::from(self.shares)
    }
}
