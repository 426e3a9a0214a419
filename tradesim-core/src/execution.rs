//! Order execution model — turns a trade decision into a fill.
//!
//! A pure function with no shared state. Slippage is a fixed absolute
//! price penalty applied against the trader: buys fill above the
//! reference price, sells below it. Commission is a flat proportional
//! rate on the filled notional.

use crate::domain::{TradeDirection, TradeRecord};
use crate::error::SimError;
use chrono::NaiveDate;

/// Execute an order, producing a fill record.
///
/// `None` direction means no transition occurred — a true no-op, not an
/// error. A zero share quantity violates the input contract and is
/// rejected before anything is computed.
pub fn fill_order(
    date: NaiveDate,
    direction: Option<TradeDirection>,
    reference_price: f64,
    shares: u32,
    slippage: f64,
    commission_rate: f64,
) -> Result<Option<TradeRecord>, SimError> {
    let Some(direction) = direction else {
        return Ok(None);
    };
    if shares == 0 {
        return Err(SimError::Config(
            "trade share quantity must be positive".into(),
        ));
    }

    let fill_price = match direction {
        TradeDirection::Buy => reference_price + slippage,
        TradeDirection::Sell => reference_price - slippage,
    };
    let commission = fill_price * f64::from(shares) * commission_rate;

    Ok(Some(TradeRecord {
        date,
        direction,
        fill_price,
        shares,
        commission,
    }))
}
