//! Commodity price entries
//!
//! A price-db file records observed exchange rates, one entry per line:
//! `P DATE SYMBOL AMOUNT`, meaning one unit of `SYMBOL` was worth `AMOUNT`
//! on `DATE`.

use std::fmt;

use crate::amount::{AmountField, Symbol};
use crate::date::Date;

/// One price-db entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    /// 1-based source line the entry starts on
    pub line: u32,
    /// Observation date as written
    pub date: Date,
    /// The commodity being priced
    pub symbol: Symbol,
    /// The worth of one unit of the commodity.
    ///
    /// The shared amount grammar admits an elided amount here; that is
    /// meaningless for a price and is left to a downstream validator.
    pub amount: AmountField,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P {} {}", self.date, self.symbol)?;
        if let AmountField::Resolved(amount) = &self.amount {
            write!(f, " {amount}")?;
        }
        Ok(())
    }
}
