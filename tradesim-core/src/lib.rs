//! TradeSim Core — signal-driven backtest simulator.
//!
//! This crate contains the heart of the simulator:
//! - Domain types (price bars, signals, trade records, the portfolio ledger)
//! - Order execution model (fixed slippage, proportional commission)
//! - Date-by-date simulation loop with transition detection
//! - Performance metrics (annualized return, max drawdown, Sharpe ratio)
//! - Signal strategy trait with MA-crossover and buy-and-hold variants
//! - CSV price feed and a seeded synthetic series generator
//! - Parallel parameter sweep over isolated engine instances
//!
//! Temporal causality is the load-bearing invariant: a decision at date
//! `t` may use only information available up to and including `t`. The
//! loop is strictly sequential; concurrency exists only across fully
//! isolated runs.

pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod execution;
pub mod metrics;
pub mod strategy;
pub mod sweep;

pub use data::{synthetic_walk, PriceFeed};
pub use domain::{
    Portfolio, PriceBar, Signal, SignalValue, TradeDirection, TradeRecord, ValuationPoint,
};
pub use engine::{align_signals, transition, Engine, EngineConfig, RunResult};
pub use error::SimError;
pub use execution::fill_order;
pub use metrics::PerformanceReport;
pub use strategy::{BuyAndHold, MaCrossover, SignalStrategy};
pub use sweep::{sweep_ma_grid, SweepRow};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync, so parallel
    /// sweeps can move isolated runs across threads freely.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PriceBar>();
        require_sync::<PriceBar>();
        require_send::<Signal>();
        require_sync::<Signal>();
        require_send::<TradeRecord>();
        require_sync::<TradeRecord>();
        require_send::<Portfolio>();
        require_sync::<Portfolio>();
        require_send::<Engine>();
        require_sync::<Engine>();
        require_send::<EngineConfig>();
        require_sync::<EngineConfig>();
        require_send::<RunResult>();
        require_sync::<RunResult>();
        require_send::<PerformanceReport>();
        require_sync::<PerformanceReport>();
    }

    /// Architecture contract: SignalStrategy does NOT accept the ledger.
    ///
    /// The trait signature takes `&[PriceBar]` and nothing else — if it
    /// ever grows a portfolio parameter, strategies gain hindsight and
    /// this stops compiling.
    #[test]
    fn strategy_trait_has_no_portfolio_parameter() {
        fn _check_trait_object_builds(
            strategy: &dyn SignalStrategy,
            bars: &[PriceBar],
        ) -> Vec<Signal> {
            strategy.generate(bars)
        }
    }
}
