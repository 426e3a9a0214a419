//! Performance metrics — pure functions over a finished valuation series.
//!
//! Every metric is a pure function: valuation series in, scalar out.
//! Degenerate inputs (empty series, single point, zero elapsed days,
//! zero-variance returns) resolve to 0.0 — they are well-defined
//! fallbacks, never errors and never NaN.

use crate::domain::ValuationPoint;
use serde::{Deserialize, Serialize};

/// Trading periods per year, the daily-data annualization convention.
/// Running the model on a different periodicity requires substituting
/// the correct factor.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per year, used for elapsed-time compounding.
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// Aggregate performance report for a single backtest run.
///
/// Derived and stateless: recomputable at any time from a valuation
/// series, never persisted as part of the ledger. Values are plain
/// numbers; formatting belongs to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub annualized_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

impl PerformanceReport {
    /// Compute all metrics from a valuation series.
    pub fn compute(series: &[ValuationPoint], risk_free_rate: f64) -> Self {
        Self {
            annualized_return: annualized_return(series),
            max_drawdown: max_drawdown(series),
            sharpe_ratio: sharpe_ratio(series, risk_free_rate),
        }
    }
}

/// Annualized return from first to last valuation point.
///
/// The whole run is treated as a single compounding period:
/// `(1 + total_return)^(365 / elapsed_days) - 1`. That is the defined
/// semantics, not an approximation of day-by-day compounding.
/// Fewer than 2 points or zero elapsed calendar days → 0.0.
pub fn annualized_return(series: &[ValuationPoint]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let first = &series[0];
    let last = &series[series.len() - 1];
    if first.total_value <= 0.0 {
        return 0.0;
    }
    let elapsed_days = (last.date - first.date).num_days();
    if elapsed_days == 0 {
        return 0.0;
    }
    let total_return = (last.total_value - first.total_value) / first.total_value;
    let growth = 1.0 + total_return;
    if growth <= 0.0 {
        // Total loss (or worse): compounding is undefined, report -100%.
        return -1.0;
    }
    growth.powf(CALENDAR_DAYS_PER_YEAR / elapsed_days as f64) - 1.0
}

/// Maximum drawdown as a negative fraction (e.g. -0.15 = 15% decline).
///
/// Drawdown at each point is measured against the running peak; the
/// result is the most negative value over the whole series. Always in
/// [-1, 0] for a non-negative valuation series.
pub fn max_drawdown(series: &[ValuationPoint]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let mut peak = series[0].total_value;
    let mut max_dd = 0.0_f64;
    for point in series {
        if point.total_value > peak {
            peak = point.total_value;
        }
        if peak > 0.0 {
            let dd = (point.total_value - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe-like ratio from per-period simple returns.
///
/// The first point's return is 0 by convention. Excess return subtracts
/// `risk_free_rate / 252` per period; the result is
/// `sqrt(252) × mean(excess) / std(excess)` with the sample standard
/// deviation. Zero variance (constant returns) → 0.0, never NaN or Inf.
pub fn sharpe_ratio(series: &[ValuationPoint], risk_free_rate: f64) -> f64 {
    let returns = period_returns(series);
    if returns.len() < 2 {
        return 0.0;
    }
    let period_rf = risk_free_rate / TRADING_DAYS_PER_YEAR;
    let excess: Vec<f64> = returns.iter().map(|r| r - period_rf).collect();
    let mean = mean_f64(&excess);
    let std = std_dev(&excess);
    if std < 1e-15 {
        return 0.0;
    }
    TRADING_DAYS_PER_YEAR.sqrt() * mean / std
}

/// Per-period simple returns, one entry per valuation point.
///
/// The first entry is 0.0 by convention (defined, not undefined).
pub fn period_returns(series: &[ValuationPoint]) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }
    let mut returns = Vec::with_capacity(series.len());
    returns.push(0.0);
    for window in series.windows(2) {
        let prev = window[0].total_value;
        let curr = window[1].total_value;
        returns.push(if prev > 0.0 { (curr - prev) / prev } else { 0.0 });
    }
    returns
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator).
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
