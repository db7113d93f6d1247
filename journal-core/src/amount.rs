//! Amounts, commodity symbols, and their written layout
//!
//! An amount is an exact decimal quantity denominated in a commodity symbol.
//! Journals write amounts in four layouts (`$45.00`, `$ 45.00`, `45.00$`,
//! `45.00 $`); the layout is captured alongside the value so a printer can
//! reproduce it. Quantities use `rust_decimal::Decimal`, which preserves the
//! written scale: `45.00` and `45` are numerically equal but render
//! differently, and both survive a round trip.

use std::fmt;

use compact_str::CompactString;
use rust_decimal::Decimal;

/// A commodity symbol, e.g. `$`, `US$`, `AAPL`, or `"MUTF514"`.
///
/// Quoting is part of the symbol's identity for rendering purposes: a quoted
/// symbol may contain characters (digits, spaces, `-`) that would otherwise
/// terminate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Symbol text, without the surrounding quotes if any
    pub value: CompactString,
    /// Whether the symbol was written inside double quotes
    pub quoted: bool,
}

impl Symbol {
    /// Create a symbol.
    pub fn new(value: impl Into<CompactString>, quoted: bool) -> Self {
        Symbol { value: value.into(), quoted }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "\"{}\"", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// The written layout of an amount: which side the symbol is on, and whether
/// a space separates it from the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountFormat {
    /// `$45.00`
    SymbolLeftNoSpace,
    /// `$ 45.00`
    SymbolLeftWithSpace,
    /// `45.00$`
    SymbolRightNoSpace,
    /// `45.00 $`
    SymbolRightWithSpace,
}

impl AmountFormat {
    /// Layout with the symbol before the quantity.
    pub fn symbol_left(spaced: bool) -> Self {
        if spaced {
            AmountFormat::SymbolLeftWithSpace
        } else {
            AmountFormat::SymbolLeftNoSpace
        }
    }

    /// Layout with the symbol after the quantity.
    pub fn symbol_right(spaced: bool) -> Self {
        if spaced {
            AmountFormat::SymbolRightWithSpace
        } else {
            AmountFormat::SymbolRightNoSpace
        }
    }

    /// Whether the symbol precedes the quantity.
    pub fn symbol_on_left(&self) -> bool {
        matches!(self, AmountFormat::SymbolLeftNoSpace | AmountFormat::SymbolLeftWithSpace)
    }

    /// Whether a space separates symbol and quantity.
    pub fn spaced(&self) -> bool {
        matches!(self, AmountFormat::SymbolLeftWithSpace | AmountFormat::SymbolRightWithSpace)
    }
}

/// An exact decimal quantity of some commodity, plus its written layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    /// The quantity, with written scale preserved
    pub quantity: Decimal,
    /// The commodity the quantity is denominated in
    pub symbol: Symbol,
    /// The layout the amount was written in
    pub format: AmountFormat,
}

impl Amount {
    /// Create an amount.
    pub fn new(quantity: Decimal, symbol: Symbol, format: AmountFormat) -> Self {
        Amount { quantity, symbol, format }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            AmountFormat::SymbolLeftNoSpace => write!(f, "{}{}", self.symbol, self.quantity),
            AmountFormat::SymbolLeftWithSpace => write!(f, "{} {}", self.symbol, self.quantity),
            AmountFormat::SymbolRightNoSpace => write!(f, "{}{}", self.quantity, self.symbol),
            AmountFormat::SymbolRightWithSpace => write!(f, "{} {}", self.quantity, self.symbol),
        }
    }
}

/// An amount position in the tree: either written out, or elided so that a
/// downstream balancing pass must infer it.
///
/// Postings may elide their amount; the price-db grammar shares the amount
/// rule, so an elided price amount also parses here and is left for a
/// downstream validator to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountField {
    /// The amount as written
    Resolved(Amount),
    /// No amount was written; it is to be inferred downstream
    Infer,
}

impl AmountField {
    /// Whether the amount was elided.
    pub fn is_inferred(&self) -> bool {
        matches!(self, AmountField::Infer)
    }

    /// The written amount, if there was one.
    pub fn resolved(&self) -> Option<&Amount> {
        match self {
            AmountField::Resolved(amount) => Some(amount),
            AmountField::Infer => None,
        }
    }
}
