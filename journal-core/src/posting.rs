//! Posting representation
//!
//! A posting is one indented line of a transaction: an account, an optional
//! amount, and an optional trailing comment. Each posting keeps a shared
//! handle to the header of the transaction that encloses it.

use compact_str::CompactString;

use crate::account::Account;
use crate::amount::AmountField;
use crate::transaction::HeaderRef;

/// One posting line of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    /// Header of the enclosing transaction
    pub header: HeaderRef,
    /// 1-based source line the posting starts on
    pub line: u32,
    /// The account debited or credited
    pub account: Account,
    /// The amount, or [`AmountField::Infer`] when elided
    pub amount: AmountField,
    /// Trailing `;` comment, without the `;`
    pub comment: Option<CompactString>,
}
