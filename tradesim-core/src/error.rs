//! Structured error types for the simulator.
//!
//! Degenerate analytics inputs (empty or single-point valuation series,
//! zero elapsed days, zero-variance returns) are deliberately NOT errors —
//! the metric functions resolve them to 0.0. Errors here cover only
//! precondition violations, detected before any state is mutated.

use thiserror::Error;

/// Errors produced by the simulator core.
#[derive(Debug, Error)]
pub enum SimError {
    /// Missing or invalid setup: no data source, zero trade quantity,
    /// negative commission rate. Never recovered.
    #[error("configuration error: {0}")]
    Config(String),

    /// Operation invoked out of order, e.g. querying a price feed
    /// before loading it.
    #[error("not loaded: {0}")]
    NotLoaded(String),

    /// Malformed input series: unparseable CSV row, duplicate dates,
    /// non-positive close.
    #[error("data error: {0}")]
    Data(String),
}
