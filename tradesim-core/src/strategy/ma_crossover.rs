//! Moving-average crossover — long while the fast SMA sits above the slow.
//!
//! This is a level signal, not an edge signal: the strategy reports the
//! desired position state each day and the engine detects transitions.

use super::SignalStrategy;
use crate::domain::{PriceBar, Signal, SignalValue};

/// Simple-moving-average crossover strategy.
///
/// Emits Long for each date where the fast SMA is strictly above the
/// slow SMA, Flat otherwise. No signal is emitted before `slow` bars of
/// history exist, so the warmup window merges as Flat.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    pub fast: usize,
    pub slow: usize,
}

impl MaCrossover {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1, "fast period must be >= 1");
        assert!(slow > fast, "slow period must be > fast period");
        Self { fast, slow }
    }

    pub fn default_params() -> Self {
        Self::new(10, 50)
    }

    /// Trailing SMA over `period` bars ending at `index` (inclusive).
    fn sma(bars: &[PriceBar], index: usize, period: usize) -> f64 {
        let start = index + 1 - period;
        let sum: f64 = bars[start..=index].iter().map(|b| b.close).sum();
        sum / period as f64
    }
}

impl SignalStrategy for MaCrossover {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn generate(&self, bars: &[PriceBar]) -> Vec<Signal> {
        if bars.len() < self.slow {
            return Vec::new();
        }
        let mut signals = Vec::with_capacity(bars.len() - self.slow + 1);
        for i in (self.slow - 1)..bars.len() {
            let fast = Self::sma(bars, i, self.fast);
            let slow = Self::sma(bars, i, self.slow);
            let value = if fast > slow {
                SignalValue::Long
            } else {
                SignalValue::Flat
            };
            signals.push(Signal::new(bars[i].date, value));
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::new(start + chrono::Duration::days(i as i64), c))
            .collect()
    }

    #[test]
    fn no_signals_before_warmup() {
        let strategy = MaCrossover::new(2, 4);
        assert!(strategy.generate(&bars(&[100.0, 101.0, 102.0])).is_empty());
    }

    #[test]
    fn signal_count_matches_post_warmup_bars() {
        let strategy = MaCrossover::new(2, 4);
        let series = bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let signals = strategy.generate(&series);
        assert_eq!(signals.len(), 3); // indices 3, 4, 5
        assert_eq!(signals[0].date, series[3].date);
    }

    #[test]
    fn rising_prices_go_long() {
        let strategy = MaCrossover::new(2, 4);
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let signals = strategy.generate(&bars(&closes));
        // A steady uptrend keeps the fast SMA above the slow SMA.
        assert!(signals.iter().all(|s| s.value == SignalValue::Long));
    }

    #[test]
    fn falling_prices_stay_flat() {
        let strategy = MaCrossover::new(2, 4);
        let closes: Vec<f64> = (0..10).map(|i| 100.0 - i as f64).collect();
        let signals = strategy.generate(&bars(&closes));
        assert!(signals.iter().all(|s| s.value == SignalValue::Flat));
    }

    #[test]
    fn trend_reversal_flips_the_signal() {
        let strategy = MaCrossover::new(2, 4);
        let mut closes: Vec<f64> = (0..8).map(|i| 100.0 + i as f64).collect();
        closes.extend((0..8).map(|i| 107.0 - 3.0 * i as f64));
        let signals = strategy.generate(&bars(&closes));
        let values: Vec<_> = signals.iter().map(|s| s.value).collect();
        assert!(values.contains(&SignalValue::Long));
        assert!(values.contains(&SignalValue::Flat));
        // Once the downtrend establishes, the signal stays flat.
        assert_eq!(*values.last().unwrap(), SignalValue::Flat);
    }

    #[test]
    fn uses_only_past_data() {
        // Signals over a prefix must match the prefix of signals over the
        // full series — the future cannot change the past.
        let strategy = MaCrossover::new(3, 6);
        let mut closes: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let full = strategy.generate(&bars(&closes));
        closes.truncate(12);
        let prefix = strategy.generate(&bars(&closes));
        assert_eq!(&full[..prefix.len()], &prefix[..]);
    }

    #[test]
    #[should_panic(expected = "slow period must be > fast period")]
    fn rejects_slow_leq_fast() {
        MaCrossover::new(10, 10);
    }

    #[test]
    #[should_panic(expected = "fast period must be >= 1")]
    fn rejects_zero_fast() {
        MaCrossover::new(0, 10);
    }

    #[test]
    fn name_and_defaults() {
        let strategy = MaCrossover::default_params();
        assert_eq!(strategy.name(), "ma_crossover");
        assert_eq!(strategy.fast, 10);
        assert_eq!(strategy.slow, 50);
    }
}
