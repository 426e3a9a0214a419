//! Parameter sweep — many isolated backtests in parallel.
//!
//! Each grid cell gets its own engine and ledger; the cells share no
//! mutable state, so running them on a rayon pool preserves the
//! single-owner discipline of the simulation loop.

use crate::domain::PriceBar;
use crate::engine::{Engine, EngineConfig};
use crate::error::SimError;
use crate::metrics::PerformanceReport;
use crate::strategy::{MaCrossover, SignalStrategy};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of one grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRow {
    pub fast: usize,
    pub slow: usize,
    pub trade_count: usize,
    pub final_value: f64,
    pub report: PerformanceReport,
}

/// Backtest every (fast, slow) pair with `fast < slow` over the grid.
///
/// Rows come back sorted by Sharpe ratio, best first. Parameter pairs
/// that are not strictly ordered are skipped, not errors.
pub fn sweep_ma_grid(
    bars: &[PriceBar],
    fast_periods: &[usize],
    slow_periods: &[usize],
    config: &EngineConfig,
) -> Result<Vec<SweepRow>, SimError> {
    config.validate()?;

    let grid: Vec<(usize, usize)> = fast_periods
        .iter()
        .flat_map(|&fast| slow_periods.iter().map(move |&slow| (fast, slow)))
        .filter(|&(fast, slow)| fast >= 1 && slow > fast)
        .collect();

    let mut rows = grid
        .into_par_iter()
        .map(|(fast, slow)| {
            let strategy = MaCrossover::new(fast, slow);
            let signals = strategy.generate(bars);
            let engine = Engine::new(config.clone())?;
            let result = engine.run(bars, &signals)?;
            Ok(SweepRow {
                fast,
                slow,
                trade_count: result.trades.len(),
                final_value: result.final_value(config.initial_capital),
                report: result.report,
            })
        })
        .collect::<Result<Vec<_>, SimError>>()?;

    rows.sort_by(|a, b| {
        b.report
            .sharpe_ratio
            .partial_cmp(&a.report.sharpe_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(rows)
}
