//! Buy-and-hold — long from the first bar onward.

use super::SignalStrategy;
use crate::domain::{PriceBar, Signal, SignalValue};

/// Always-long baseline strategy.
///
/// The engine turns this into a single enter-long transition on the
/// first date and no exit, so the position is marked to market through
/// the end of the series.
pub struct BuyAndHold;

impl SignalStrategy for BuyAndHold {
    fn name(&self) -> &str {
        "buy_and_hold"
    }

    fn generate(&self, bars: &[PriceBar]) -> Vec<Signal> {
        bars.iter()
            .map(|bar| Signal::new(bar.date, SignalValue::Long))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn long_on_every_date() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<PriceBar> = (0..5)
            .map(|i| PriceBar::new(start + chrono::Duration::days(i), 100.0 + i as f64))
            .collect();
        let signals = BuyAndHold.generate(&bars);
        assert_eq!(signals.len(), 5);
        assert!(signals.iter().all(|s| s.value == SignalValue::Long));
        assert_eq!(signals[0].date, start);
    }

    #[test]
    fn empty_series_yields_no_signals() {
        assert!(BuyAndHold.generate(&[]).is_empty());
    }
}
