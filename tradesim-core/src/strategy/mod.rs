//! Signal strategies — pure functions from a price series to a signal series.
//!
//! Strategies are ledger-agnostic: they see the price history and nothing
//! else. Any derived value (a moving average, say) must use only data up
//! to and including each row's date — no future leakage. The engine, not
//! the strategy, decides what a signal change means for the portfolio.

pub mod buy_and_hold;
pub mod ma_crossover;

use crate::domain::{PriceBar, Signal};

/// Trait for signal-generating strategies.
///
/// # Architecture invariant
/// `generate` is a pure function of the input series: no hidden state,
/// no portfolio access, no lookahead. Implementations may emit fewer
/// signals than there are bars — uncovered dates merge as Flat.
pub trait SignalStrategy: Send + Sync {
    /// Human-readable name (e.g. "ma_crossover").
    fn name(&self) -> &str;

    /// Produce one signal per covered date, using only `bars[0..=i]`
    /// for the signal at index `i`.
    fn generate(&self, bars: &[PriceBar]) -> Vec<Signal>;
}

/// Null strategy — emits nothing. Used as a stub in tests that don't
/// need real signal generation.
pub struct NullStrategy;

impl SignalStrategy for NullStrategy {
    fn name(&self) -> &str {
        "null"
    }

    fn generate(&self, _bars: &[PriceBar]) -> Vec<Signal> {
        Vec::new()
    }
}

pub use buy_and_hold::BuyAndHold;
pub use ma_crossover::MaCrossover;
