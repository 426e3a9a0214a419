//! Signal — a discrete directional instruction attached to a date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Directional value of a signal.
///
/// `Short` is accepted as input data, but the engine defines no
/// short-entry transition for it — only Flat→Long and Long→Flat trigger
/// trades. Shorting semantics would need further requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignalValue {
    Long,
    #[default]
    Flat,
    Short,
}

impl SignalValue {
    pub fn as_i8(self) -> i8 {
        match self {
            SignalValue::Long => 1,
            SignalValue::Flat => 0,
            SignalValue::Short => -1,
        }
    }
}

/// A signal emitted by a strategy for one date.
///
/// At most one signal per date; dates without a signal are treated as
/// Flat when merged with the price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub date: NaiveDate,
    pub value: SignalValue,
}

impl Signal {
    pub fn new(date: NaiveDate, value: SignalValue) -> Self {
        Self { date, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_value_encoding() {
        assert_eq!(SignalValue::Long.as_i8(), 1);
        assert_eq!(SignalValue::Flat.as_i8(), 0);
        assert_eq!(SignalValue::Short.as_i8(), -1);
    }

    #[test]
    fn default_is_flat() {
        assert_eq!(SignalValue::default(), SignalValue::Flat);
    }
}
