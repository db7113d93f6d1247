//! Transaction headers and transaction blocks
//!
//! A transaction is one header line (`DATE STATUS [(CODE)] PAYEE [;COMMENT]`)
//! followed by indented posting lines. The header is shared between the
//! transaction and each of its postings through an [`HeaderRef`]; the
//! relation is acyclic since headers reference nothing.

use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;

use crate::date::Date;
use crate::posting::Posting;

/// Clearing status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Written `*`
    Cleared,
    /// Written `!`
    Uncleared,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Cleared => f.write_str("*"),
            Status::Uncleared => f.write_str("!"),
        }
    }
}

/// The header line of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// 1-based source line the header starts on
    pub line: u32,
    /// Transaction date as written
    pub date: Date,
    /// Clearing status
    pub status: Status,
    /// Parenthesised code, e.g. a cheque number; may be empty text
    pub code: Option<String>,
    /// Payee text, verbatim up to the comment or end of line
    pub payee: String,
    /// Trailing `;` comment, without the `;`
    pub comment: Option<CompactString>,
}

impl Header {
    /// Create a header; the source line defaults to 1 and is set with
    /// [`Header::at_line`].
    pub fn new(
        date: Date,
        status: Status,
        code: Option<String>,
        payee: String,
        comment: Option<CompactString>,
    ) -> Self {
        Header { line: 1, date, status, code, payee, comment }
    }

    /// Attach the source line the header starts on.
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }
}

/// Shared handle to a transaction header.
///
/// The transaction owns the header; each posting holds another handle to it
/// for the convenience of downstream passes.
pub type HeaderRef = Rc<Header>;

/// A parsed transaction: a header and its postings, in source order.
///
/// Comment lines inside the block are consumed during parsing and do not
/// appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The header line
    pub header: HeaderRef,
    /// The postings of the block, in source order
    pub postings: Vec<Posting>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Cleared.to_string(), "*");
        assert_eq!(Status::Uncleared.to_string(), "!");
    }

    #[test]
    fn test_header_at_line() {
        let header = Header::new(
            Date::new(2015, 10, 20),
            Status::Cleared,
            None,
            "Payee".to_string(),
            None,
        )
        .at_line(7);
        assert_eq!(header.line, 7);
        assert_eq!(header.date, Date::new(2015, 10, 20));
    }
}
