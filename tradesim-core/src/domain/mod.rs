//! Domain types — price bars, signals, trade records, and the portfolio ledger.

pub mod bar;
pub mod portfolio;
pub mod signal;
pub mod trade;

pub use bar::PriceBar;
pub use portfolio::{Portfolio, ValuationPoint};
pub use signal::{Signal, SignalValue};
pub use trade::{TradeDirection, TradeRecord};
