//! Core parser for plain-text double-entry accounting journals
//!
//! This crate turns journal text in the Ledger family of formats into a
//! typed, position-annotated syntax tree. A journal is a sequence of dated
//! transactions, each made of one or more postings against hierarchical
//! accounts, carrying amounts in arbitrary commodities. A separate price-db
//! format records observed commodity prices, one `P` entry per line.
//!
//! The crate parses; it does not interpret. Balancing a transaction,
//! inferring an elided amount, validating calendar dates and account names,
//! and price-history lookup all belong to downstream passes working over the
//! tree produced here. To keep those passes honest, the tree preserves what
//! was written: quantities are exact decimals with their written scale,
//! amounts remember which of the four symbol/spacing layouts they used, and
//! every node records the source line it started on.

#![warn(clippy::all)]
#![warn(missing_docs)]

/// Module for calendar dates as written in the journal
pub mod date;

/// Module for amounts, commodity symbols, and their written layout
pub mod amount;

/// Module for hierarchical account paths
pub mod account;

/// Module for transaction headers and transaction blocks
pub mod transaction;

/// Module for posting representation
pub mod posting;

/// Module for commodity price entries
pub mod price;

/// Module for the journal container and canonical rendering
pub mod journal;

/// Module for journal text parsing using nom combinators
pub mod parser;
