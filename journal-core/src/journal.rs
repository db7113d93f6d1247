//! Journal container and canonical rendering
//!
//! [`Journal`] owns the transactions of one parsed input and offers the
//! small enumeration helpers downstream passes start from. Rendering writes
//! the tree back out as journal text: canonical in its whitespace and date
//! separators, faithful in everything the tree preserves (amount layout,
//! quantity scale, payee and comment text).

use std::collections::BTreeSet;
use std::io;

use crate::amount::AmountField;
use crate::parser::{parse_journal, ParseError};
use crate::transaction::Transaction;

/// An in-memory journal: the transactions of one parsed input, in source
/// order.
#[derive(Debug, Default, Clone)]
pub struct Journal {
    /// Parsed transactions
    pub transactions: Vec<Transaction>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse journal text.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(Journal { transactions: parse_journal(text)? })
    }

    /// Add a transaction to the journal.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Merge another journal's transactions into this one, after the
    /// existing ones. Useful when assembling one journal from several
    /// inputs.
    pub fn merge(&mut self, other: Journal) {
        self.transactions.extend(other.transactions);
    }

    /// Full names of every account posted to, sorted and deduplicated.
    pub fn accounts(&self) -> BTreeSet<String> {
        self.transactions
            .iter()
            .flat_map(|transaction| &transaction.postings)
            .map(|posting| posting.account.full_name())
            .collect()
    }

    /// Every commodity symbol appearing in a written amount, sorted and
    /// deduplicated. Elided amounts contribute nothing.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.transactions
            .iter()
            .flat_map(|transaction| &transaction.postings)
            .filter_map(|posting| posting.amount.resolved())
            .map(|amount| amount.symbol.value.to_string())
            .collect()
    }

    /// Write all transactions in canonical journal form.
    ///
    /// Canonical means `/`-separated dates, single spaces between header
    /// fields, two-space posting indentation, and a blank line between
    /// transactions. Amount layout and quantity scale are reproduced as
    /// written.
    pub fn write_transactions(&self, writer: &mut impl io::Write) -> io::Result<()> {
        for (i, transaction) in self.transactions.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }
            write_transaction(writer, transaction)?;
        }
        Ok(())
    }

    /// Render all transactions as a String in canonical journal form.
    pub fn format_transactions(&self) -> String {
        let mut buffer = Vec::new();
        self.write_transactions(&mut buffer).expect("writing to string");
        String::from_utf8(buffer).expect("rendered journal is utf-8")
    }
}

fn write_transaction(writer: &mut impl io::Write, transaction: &Transaction) -> io::Result<()> {
    let header = &*transaction.header;
    write!(writer, "{} {}", header.date, header.status)?;
    if let Some(code) = &header.code {
        write!(writer, " ({code})")?;
    }
    write!(writer, " {}", header.payee)?;
    if let Some(comment) = &header.comment {
        write!(writer, ";{comment}")?;
    }
    writeln!(writer)?;

    for posting in &transaction.postings {
        write!(writer, "  {}", posting.account)?;
        if let AmountField::Resolved(amount) = &posting.amount {
            write!(writer, "  {amount}")?;
        }
        if let Some(comment) = &posting.comment {
            write!(writer, "  ;{comment}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
