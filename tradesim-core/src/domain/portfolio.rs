//! Portfolio — the mutable ledger of cash, shares, trades, and daily valuation.

use super::trade::{TradeDirection, TradeRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One mark-to-market snapshot, appended once per processed date.
///
/// The valuation identity holds at every point:
/// `total_value == cash + shares × mark price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    pub date: NaiveDate,
    pub total_value: f64,
    pub cash: f64,
    pub shares: i64,
}

/// Aggregate ledger state for one backtest run.
///
/// Owned and exclusively mutated by a single engine for the duration of
/// the run, through exactly two operations: [`Portfolio::apply_trade`]
/// and [`Portfolio::record_daily_value`]. Read-only afterwards.
///
/// This long-only model does not prevent `shares` from going negative
/// (there is no short-sale margin check) — an accepted simplification,
/// not a defect to guard against.
#[derive(Debug, Clone)]
pub struct Portfolio {
    initial_capital: f64,
    cash: f64,
    shares: i64,
    trades: Vec<TradeRecord>,
    valuation: Vec<ValuationPoint>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            cash: initial_capital,
            shares: 0,
            trades: Vec::new(),
            valuation: Vec::new(),
        }
    }

    /// Apply an executed trade to cash and holdings. `None` is a no-op.
    ///
    /// Buy: cash decreases by notional plus commission, shares increase.
    /// Sell: cash increases by notional minus commission, shares decrease.
    /// The record is appended to the trade history unconditionally.
    pub fn apply_trade(&mut self, record: Option<TradeRecord>) {
        let Some(record) = record else {
            return;
        };
        let qty = i64::from(record.shares);
        match record.direction {
            TradeDirection::Buy => {
                self.cash -= record.notional() + record.commission;
                self.shares += qty;
            }
            TradeDirection::Sell => {
                self.cash += record.notional() - record.commission;
                self.shares -= qty;
            }
        }
        self.trades.push(record);
    }

    /// Mark the portfolio to market and append a valuation point.
    ///
    /// Must be called exactly once per distinct date, in ascending order,
    /// after any trade for that date has been applied.
    pub fn record_daily_value(&mut self, date: NaiveDate, mark_price: f64) {
        self.valuation.push(ValuationPoint {
            date,
            total_value: self.cash + self.shares as f64 * mark_price,
            cash: self.cash,
            shares: self.shares,
        });
    }

    /// The accumulated valuation series, ascending by date.
    ///
    /// Safe to call mid-run for diagnostics; canonical use is post-run.
    pub fn valuation_series(&self) -> &[ValuationPoint] {
        &self.valuation
    }

    /// The full ordered trade log.
    pub fn trade_history(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn shares(&self) -> i64 {
        self.shares
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    /// Consume the ledger, yielding the valuation series and trade log.
    pub fn into_parts(self) -> (Vec<ValuationPoint>, Vec<TradeRecord>) {
        (self.valuation, self.trades)
    }
}
