//! Simulation engine — the date-by-date event loop.
//!
//! One pass over the price series, strictly in ascending date order:
//!
//! 1. Align: left-join the signal series onto price dates (missing → Flat)
//! 2. Detect: compare previous vs. current signal for a transition
//! 3. Execute: at most one fill per transition, applied to the ledger
//! 4. Mark: record the day's valuation at the close, unconditionally
//!
//! After the series is consumed the performance report is computed from
//! the finished valuation series. The loop is single-threaded by design:
//! each day's decision depends on the prior signal and the running ledger,
//! so parallelism only makes sense across fully isolated runs (see
//! [`crate::sweep`]).

use crate::domain::{
    Portfolio, PriceBar, Signal, SignalValue, TradeDirection, TradeRecord, ValuationPoint,
};
use crate::error::SimError;
use crate::execution::fill_order;
use crate::metrics::PerformanceReport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for a single backtest run.
///
/// Constructed once and passed into the engine; there is no process-wide
/// mutable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub initial_capital: f64,
    /// Fixed absolute price penalty per fill, applied against the trader.
    pub slippage: f64,
    /// Flat proportional commission on filled notional.
    pub commission_rate: f64,
    /// Fixed share quantity per transition trade.
    pub trade_shares: u32,
    /// Annual risk-free rate for the Sharpe computation.
    pub risk_free_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            slippage: 0.0,
            commission_rate: 0.0,
            trade_shares: 100,
            risk_free_rate: 0.0,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration, failing fast before any state exists.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.initial_capital.is_finite() && self.initial_capital > 0.0) {
            return Err(SimError::Config("initial capital must be positive".into()));
        }
        if self.trade_shares == 0 {
            return Err(SimError::Config(
                "trade share quantity must be positive".into(),
            ));
        }
        if !(self.commission_rate.is_finite() && self.commission_rate >= 0.0) {
            return Err(SimError::Config(
                "commission rate must be non-negative".into(),
            ));
        }
        if !(self.slippage.is_finite() && self.slippage >= 0.0) {
            return Err(SimError::Config("slippage must be non-negative".into()));
        }
        Ok(())
    }
}

/// Result of a complete backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Mark-to-market snapshot at each processed date.
    pub valuation_series: Vec<ValuationPoint>,
    /// All trades executed during the run, in order.
    pub trades: Vec<TradeRecord>,
    /// Metrics computed from the finished valuation series.
    pub report: PerformanceReport,
}

impl RunResult {
    /// Final portfolio value, or the initial capital for an empty run.
    pub fn final_value(&self, initial_capital: f64) -> f64 {
        self.valuation_series
            .last()
            .map(|p| p.total_value)
            .unwrap_or(initial_capital)
    }
}

/// Left-join the signal series onto price dates.
///
/// Produces exactly one signal value per price bar, in bar order. Dates
/// without a signal are Flat; signal rows for dates absent from the
/// price series are silently ignored (the merge is price-date driven).
pub fn align_signals(bars: &[PriceBar], signals: &[Signal]) -> Vec<SignalValue> {
    let by_date: HashMap<_, _> = signals.iter().map(|s| (s.date, s.value)).collect();
    bars.iter()
        .map(|bar| by_date.get(&bar.date).copied().unwrap_or_default())
        .collect()
}

/// Trade direction implied by a signal transition, if any.
///
/// Only Flat→Long (enter) and Long→Flat (exit) are defined transitions.
/// Every other pair — including anything involving Short — produces no
/// trade; short-entry semantics are deliberately left unspecified.
pub fn transition(previous: SignalValue, current: SignalValue) -> Option<TradeDirection> {
    match (previous, current) {
        (SignalValue::Flat, SignalValue::Long) => Some(TradeDirection::Buy),
        (SignalValue::Long, SignalValue::Flat) => Some(TradeDirection::Sell),
        _ => None,
    }
}

/// The simulation engine: owns the ledger for the duration of one run.
pub struct Engine {
    config: EngineConfig,
    portfolio: Portfolio,
}

impl Engine {
    /// Create an engine, validating the configuration up front.
    pub fn new(config: EngineConfig) -> Result<Self, SimError> {
        config.validate()?;
        let portfolio = Portfolio::new(config.initial_capital);
        Ok(Self { config, portfolio })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The ledger, readable mid-run for diagnostics.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Run the full simulation over a price series and signal series.
    ///
    /// Consumes the engine: a run is an atomic, complete pass, and
    /// re-running requires a fresh engine and ledger. An empty price
    /// series performs zero iterations and yields an all-zero report —
    /// that is a degenerate input, not an error.
    pub fn run(mut self, bars: &[PriceBar], signals: &[Signal]) -> Result<RunResult, SimError> {
        let aligned = align_signals(bars, signals);

        let mut previous = SignalValue::Flat;
        for (bar, &current) in bars.iter().zip(&aligned) {
            let direction = transition(previous, current);
            let trade = fill_order(
                bar.date,
                direction,
                bar.close,
                self.config.trade_shares,
                self.config.slippage,
                self.config.commission_rate,
            )?;
            self.portfolio.apply_trade(trade);
            self.portfolio.record_daily_value(bar.date, bar.close);
            previous = current;
        }

        let report = PerformanceReport::compute(
            self.portfolio.valuation_series(),
            self.config.risk_free_rate,
        );
        let (valuation_series, trades) = self.portfolio.into_parts();
        Ok(RunResult {
            valuation_series,
            trades,
            report,
        })
    }
}
