//! PriceBar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closing price for a single day.
///
/// The full series is sorted ascending by date with no duplicate dates.
/// That invariant is enforced by the data layer at load time; the engine
/// consumes the series as-is and does not re-validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// Basic sanity check: close must be a positive, finite price.
    pub fn is_sane(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}
