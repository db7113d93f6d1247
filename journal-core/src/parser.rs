//! Journal text parsing engine using nom combinators
//!
//! This module provides the full grammar for journal and price-db text:
//! - Transaction blocks: a header line plus indented posting lines
//! - Postings with optional amounts (four symbol/spacing layouts) and
//!   trailing comments
//! - Stand-alone comment lines, consumed and discarded
//! - Price-db files of `P DATE SYMBOL AMOUNT` entries
//!
//! The grammar is layered: character classes at the bottom, then lexical
//! atoms (dates, symbols, quantities), then amounts, then line-level
//! constructs, then the top-level entry points. Each layer is built from the
//! one below it through nom combinators; nothing above the atoms touches
//! characters directly. Alternation relies on nom's backtracking: a branch
//! that fails with `Err::Error` restores the input for the next branch, and
//! `opt` turns an absent construct into `None` without consuming anything.
//!
//! Position tracking comes from `nom_locate`: the input is a `LocatedSpan`
//! whose line counter advances with the cursor, and every produced node
//! records the 1-based line its first character appeared on.

use std::rc::Rc;
use std::str::FromStr;

use compact_str::CompactString;
use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1, take_while_m_n},
    character::complete::{char, line_ending, one_of, satisfy, space0, space1},
    combinator::{map, map_res, opt, recognize, value},
    error::{context, VerboseError, VerboseErrorKind},
    multi::{many0, many1, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use nom_locate::LocatedSpan;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::Account;
use crate::amount::{Amount, AmountField, AmountFormat, Symbol};
use crate::date::Date;
use crate::posting::Posting;
use crate::price::Price;
use crate::transaction::{Header, HeaderRef, Status, Transaction};

/// Error returned when journal or price-db text fails to parse.
///
/// The first failure aborts the parse; no partial tree is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line}, column {column}: expected {expected}, found {}", found_label(.found))]
pub struct ParseError {
    /// 1-based line of the offending character
    pub line: u32,
    /// 1-based column of the offending character
    pub column: usize,
    /// Label of the construct the parser was looking for
    pub expected: String,
    /// The character found instead, or `None` at end of input
    pub found: Option<char>,
}

fn found_label(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{}'", c.escape_default()),
        None => "end of input".to_string(),
    }
}

/// Convenience type wrapping `LocatedSpan<&str>`
type Input<'a> = LocatedSpan<&'a str>;

/// Result type for parsing operations
type ParseResult<'a, T> = IResult<Input<'a>, T, VerboseError<Input<'a>>>;

// ============================================================================
// Entry Points
// ============================================================================

/// Parse journal text into its transactions.
///
/// Blank lines and stand-alone comment lines before, between, and after
/// transactions are consumed and discarded. The whole input must parse; the
/// first failure is returned with its source position.
pub fn parse_journal(text: &str) -> Result<Vec<Transaction>, ParseError> {
    let input = Input::new(text);
    let (rest, transactions) = match journal(input) {
        Ok(parsed) => parsed,
        Err(error) => return Err(nom_failure(input, error)),
    };
    if !rest.fragment().is_empty() {
        return Err(error_in_rest(rest, transaction, "transaction"));
    }
    Ok(transactions)
}

/// Parse price-db text into its price entries.
///
/// Entries are separated by line endings; a single trailing line ending is
/// accepted, and empty input yields no entries.
pub fn parse_price_db(text: &str) -> Result<Vec<Price>, ParseError> {
    let input = Input::new(text);
    let (rest, prices) = match price_db(input) {
        Ok(parsed) => parsed,
        Err(error) => return Err(nom_failure(input, error)),
    };
    if !rest.fragment().is_empty() {
        return Err(error_in_rest(rest, price, "price entry"));
    }
    Ok(prices)
}

/// Diagnose input left over after the top level stopped making progress.
///
/// The top-level repetitions end by backtracking, which throws the inner
/// failure away; re-running the unit parser on the leftover recovers the
/// deepest error position and label.
fn error_in_rest<'a, T>(
    rest: Input<'a>,
    mut unit: impl FnMut(Input<'a>) -> ParseResult<'a, T>,
    label: &str,
) -> ParseError {
    match unit(rest) {
        Err(nom::Err::Error(error)) | Err(nom::Err::Failure(error)) => into_parse_error(error),
        _ => ParseError {
            line: rest.location_line(),
            column: rest.get_utf8_column(),
            expected: label.to_string(),
            found: first_char(&rest),
        },
    }
}

fn nom_failure(input: Input<'_>, error: nom::Err<VerboseError<Input<'_>>>) -> ParseError {
    match error {
        nom::Err::Error(error) | nom::Err::Failure(error) => into_parse_error(error),
        nom::Err::Incomplete(_) => ParseError {
            line: input.location_line(),
            column: input.get_utf8_column(),
            expected: "complete input".to_string(),
            found: None,
        },
    }
}

/// Convert a nom error trace into the public error.
///
/// The first entry of a `VerboseError` is the deepest failure and supplies
/// the position; the innermost `context` label supplies the expectation.
fn into_parse_error(error: VerboseError<Input<'_>>) -> ParseError {
    let innermost_context = error.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(label) => Some((*label).to_string()),
        _ => None,
    });

    match error.errors.first() {
        Some((span, kind)) => {
            let expected = innermost_context.unwrap_or_else(|| match kind {
                VerboseErrorKind::Char(c) => format!("'{c}'"),
                VerboseErrorKind::Context(label) => (*label).to_string(),
                VerboseErrorKind::Nom(kind) => kind.description().to_string(),
            });
            ParseError {
                line: span.location_line(),
                column: span.get_utf8_column(),
                expected,
                found: first_char(span),
            }
        }
        None => ParseError {
            line: 1,
            column: 1,
            expected: "input".to_string(),
            found: None,
        },
    }
}

fn first_char(span: &Input<'_>) -> Option<char> {
    span.fragment().chars().next()
}

// ============================================================================
// Character Classes
// ============================================================================

/// Anything a `( ... )` header code may contain.
fn is_code_char(c: char) -> bool {
    c != ')' && c != '\r' && c != '\n'
}

/// Payee text runs to the end of line or the start of a comment.
fn is_payee_char(c: char) -> bool {
    c != ';' && c != '\r' && c != '\n'
}

/// Comment text runs to the end of line.
fn is_comment_char(c: char) -> bool {
    c != '\r' && c != '\n'
}

fn is_quoted_symbol_char(c: char) -> bool {
    c != '"' && c != '\r' && c != '\n'
}

/// Unquoted symbols are defined by exclusion: anything that cannot begin or
/// continue a quantity, separate fields, or start a comment. In `$13,245.00`
/// only the `$` is symbol text.
fn is_unquoted_symbol_char(c: char) -> bool {
    !matches!(c, '-' | '0'..='9' | ';' | ' ' | '"' | '\t' | '\r' | '\n')
}

fn is_sub_account_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Characters a quantity may contain after its leading digit. Commas are
/// stripped before conversion; a misplaced second `.` is the converter's
/// problem, not the grammar's.
fn is_quantity_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

// ============================================================================
// Lexical Atoms
// ============================================================================

/// Run of horizontal whitespace, reporting whether anything was consumed.
/// The report feeds the amount layout: `$1` versus `$ 1`.
fn spacing(input: Input<'_>) -> ParseResult<'_, bool> {
    map(space0, |s: Input| !s.fragment().is_empty())(input)
}

/// Exactly four year digits.
fn year(input: Input<'_>) -> ParseResult<'_, i32> {
    map_res(take_while_m_n(4, 4, |c: char| c.is_ascii_digit()), |s: Input| {
        s.fragment().parse::<i32>()
    })(input)
}

/// Exactly two digits, for months and days.
fn two_digits(input: Input<'_>) -> ParseResult<'_, u32> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), |s: Input| {
        s.fragment().parse::<u32>()
    })(input)
}

fn date_separator(input: Input<'_>) -> ParseResult<'_, char> {
    one_of("/-")(input)
}

/// Parse a date as written: `2015/02/14` or `2015-02-14`.
///
/// The two separators are matched independently, so `2015/02-14` parses.
/// Calendar validity is not checked here; `2015/02/30` produces a `Date`
/// that [`Date::to_naive`] later refuses.
fn date(input: Input<'_>) -> ParseResult<'_, Date> {
    context(
        "date",
        map(
            tuple((year, date_separator, two_digits, date_separator, two_digits)),
            |(year, _, month, _, day)| Date::new(year, month, day),
        ),
    )(input)
}

/// Parse a transaction status flag: `*` cleared, `!` uncleared.
fn transaction_status(input: Input<'_>) -> ParseResult<'_, Status> {
    alt((
        value(Status::Cleared, char('*')),
        value(Status::Uncleared, char('!')),
    ))(input)
}

/// Parse a parenthesised transaction code, e.g. `(cheque #802)`. The content
/// may be empty; the closing `)` is required.
fn code(input: Input<'_>) -> ParseResult<'_, String> {
    map(
        delimited(char('('), take_while(is_code_char), char(')')),
        |s: Input| s.fragment().to_string(),
    )(input)
}

/// Parse a payee: at least one character, verbatim up to a `;` or the end of
/// the line. Trailing spaces before a comment are part of the payee.
fn payee(input: Input<'_>) -> ParseResult<'_, String> {
    map(take_while1(is_payee_char), |s: Input| s.fragment().to_string())(input)
}

/// Parse a `;` comment. The `;` is excluded from the result; any space after
/// it is kept.
fn comment(input: Input<'_>) -> ParseResult<'_, CompactString> {
    map(preceded(char(';'), take_while(is_comment_char)), |s: Input| {
        CompactString::from(*s.fragment())
    })(input)
}

/// Parse one sub-account name: a run of alphanumerics. A leading digit is
/// allowed.
fn sub_account(input: Input<'_>) -> ParseResult<'_, CompactString> {
    map(take_while1(is_sub_account_char), |s: Input| {
        CompactString::from(*s.fragment())
    })(input)
}

/// Parse an account path: sub-accounts separated by single `:` characters.
fn account(input: Input<'_>) -> ParseResult<'_, Account> {
    map(separated_list1(char(':'), sub_account), Account::new)(input)
}

/// Parse a quantity: optional `-`, a leading digit, then a greedy run of
/// digits, commas, and points.
///
/// The captured text is normalised by dropping commas and handed to the
/// decimal converter, which preserves the written scale and rejects
/// leftovers like `1.2.3`. The liberal capture is deliberate; strictness
/// lives in the conversion.
fn quantity(input: Input<'_>) -> ParseResult<'_, Decimal> {
    let written = recognize(tuple((
        opt(char('-')),
        satisfy(|c| c.is_ascii_digit()),
        take_while(is_quantity_char),
    )));
    map_res(written, |s: Input| {
        Decimal::from_str(&s.fragment().replace(',', ""))
    })(input)
}

/// Parse a double-quoted symbol, e.g. `"MUTF514"`.
fn quoted_symbol(input: Input<'_>) -> ParseResult<'_, Symbol> {
    map(
        delimited(char('"'), take_while1(is_quoted_symbol_char), char('"')),
        |s: Input| Symbol::new(*s.fragment(), true),
    )(input)
}

/// Parse an unquoted symbol, e.g. `$`, `US$`, `AAPL`.
fn unquoted_symbol(input: Input<'_>) -> ParseResult<'_, Symbol> {
    map(take_while1(is_unquoted_symbol_char), |s: Input| {
        Symbol::new(*s.fragment(), false)
    })(input)
}

/// Parse a commodity symbol, quoted or not. A leading `"` commits to the
/// quoted form.
fn symbol(input: Input<'_>) -> ParseResult<'_, Symbol> {
    alt((quoted_symbol, unquoted_symbol))(input)
}

// ============================================================================
// Amount Parsing
// ============================================================================

/// Parse an amount with the symbol first: `$45.00`, `$ 45.00`.
fn amount_symbol_then_quantity(input: Input<'_>) -> ParseResult<'_, Amount> {
    map(tuple((symbol, spacing, quantity)), |(symbol, spaced, quantity)| {
        Amount::new(quantity, symbol, AmountFormat::symbol_left(spaced))
    })(input)
}

/// Parse an amount with the quantity first: `45.00$`, `4.256 "MUTF514"`.
fn amount_quantity_then_symbol(input: Input<'_>) -> ParseResult<'_, Amount> {
    map(tuple((quantity, spacing, symbol)), |(quantity, spaced, symbol)| {
        Amount::new(quantity, symbol, AmountFormat::symbol_right(spaced))
    })(input)
}

/// Parse an amount in either order, or nothing at all.
///
/// The symbol-first order is tried first and backtracks fully on failure;
/// when neither order matches, the field is elided and no input is consumed,
/// leaving the amount for a downstream pass to infer.
fn amount_field(input: Input<'_>) -> ParseResult<'_, AmountField> {
    debug!(
        "amount_field: {:?}",
        input.fragment().lines().next().unwrap_or_default()
    );
    map(
        opt(alt((amount_symbol_then_quantity, amount_quantity_then_symbol))),
        |amount| match amount {
            Some(amount) => AmountField::Resolved(amount),
            None => AmountField::Infer,
        },
    )(input)
}

// ============================================================================
// Transaction Parsing
// ============================================================================

/// Parse a transaction header line:
/// `DATE STATUS [(CODE)] PAYEE [;COMMENT]`.
fn header(input: Input<'_>) -> ParseResult<'_, Header> {
    let line = input.location_line();
    map(
        tuple((
            date,
            space0,
            transaction_status,
            space0,
            opt(code),
            space0,
            payee,
            opt(comment),
        )),
        move |(date, _, status, _, code, _, payee, comment)| {
            Header::new(date, status, code, payee, comment).at_line(line)
        },
    )(input)
}

/// Posting as parsed, before the enclosing header is attached.
#[derive(Clone)]
struct RawPosting {
    line: u32,
    account: Account,
    amount: AmountField,
    comment: Option<CompactString>,
}

/// Parse a posting: mandatory leading whitespace (which is what tells a
/// posting line from a header line), the account, an optional amount, and an
/// optional trailing comment.
fn posting(input: Input<'_>) -> ParseResult<'_, RawPosting> {
    let line = input.location_line();
    map(
        tuple((space1, account, space0, amount_field, space0, opt(comment))),
        move |(_, account, _, amount, _, comment)| RawPosting {
            line,
            account,
            amount,
            comment,
        },
    )(input)
}

/// Parse a stand-alone comment line body: optional leading whitespace, then
/// a comment.
fn comment_line(input: Input<'_>) -> ParseResult<'_, CompactString> {
    preceded(space0, comment)(input)
}

/// A line inside a transaction block, tagged so the assembler can drop the
/// comments.
#[derive(Clone)]
enum PostingOrComment {
    Posting(RawPosting),
    Comment,
}

/// Parse one line of a transaction block: a posting or a comment line,
/// terminated by optional whitespace and a mandatory line ending.
fn posting_or_comment_line(input: Input<'_>) -> ParseResult<'_, PostingOrComment> {
    context(
        "posting",
        terminated(
            alt((
                map(posting, PostingOrComment::Posting),
                value(PostingOrComment::Comment, comment_line),
            )),
            pair(space0, line_ending),
        ),
    )(input)
}

/// Parse a transaction block: the header line, then one or more posting or
/// comment lines.
///
/// The block has no closing delimiter; it ends at the first line that is
/// neither a posting nor a comment, which fails without consuming and stops
/// the repetition. Comment lines are discarded, and every posting receives a
/// shared handle to the header.
fn transaction(input: Input<'_>) -> ParseResult<'_, Transaction> {
    let mut parser = context(
        "transaction",
        tuple((header, space0, line_ending, many1(posting_or_comment_line))),
    );

    let (rest, (header, _, _, lines)) = parser(input)?;

    let header: HeaderRef = Rc::new(header);
    let postings: Vec<Posting> = lines
        .into_iter()
        .filter_map(|line| match line {
            PostingOrComment::Posting(raw) => Some(Posting {
                header: Rc::clone(&header),
                line: raw.line,
                account: raw.account,
                amount: raw.amount,
                comment: raw.comment,
            }),
            PostingOrComment::Comment => None,
        })
        .collect();

    debug!("transaction at line {}: {} postings", header.line, postings.len());

    Ok((rest, Transaction { header, postings }))
}

/// Parse a line carrying nothing but optional whitespace and an optional
/// comment.
fn blank_or_comment_line(input: Input<'_>) -> ParseResult<'_, ()> {
    value((), tuple((space0, opt(comment), line_ending)))(input)
}

fn skip_blank_and_comment_lines(input: Input<'_>) -> ParseResult<'_, ()> {
    value((), many0(blank_or_comment_line))(input)
}

/// Parse a journal: transactions separated by any number of blank and
/// comment lines.
fn journal(input: Input<'_>) -> ParseResult<'_, Vec<Transaction>> {
    preceded(
        skip_blank_and_comment_lines,
        many0(terminated(transaction, skip_blank_and_comment_lines)),
    )(input)
}

// ============================================================================
// Price Db Parsing
// ============================================================================

/// Parse one price entry: `P DATE SYMBOL AMOUNT`.
///
/// The shared amount rule admits an elided amount here; that is semantic
/// nonsense for a price, and rejecting it belongs to a downstream validator.
fn price(input: Input<'_>) -> ParseResult<'_, Price> {
    let line = input.location_line();
    context(
        "price",
        map(
            tuple((char('P'), space1, date, space1, symbol, space1, amount_field)),
            move |(_, _, date, _, symbol, _, amount)| Price {
                line,
                date,
                symbol,
                amount,
            },
        ),
    )(input)
}

/// Parse a price-db file: price entries separated by line endings, with one
/// optional trailing line ending.
fn price_db(input: Input<'_>) -> ParseResult<'_, Vec<Price>> {
    terminated(separated_list0(line_ending, price), opt(line_ending))(input)
}

// ============================================================================
// Tests
// ============================================================================
