//! Line-oriented transaction parser for bank statement text.
//!
//! Expected cleaned text after the "Transaction History" heading:
//!   2024-01-Store Purchase AB1234 -$12.50 $987.50
//!   15
//!
//! A transaction spans several lines. The first carries the year and month
//! (`2024-01-`), later lines carry the reference, amount and balance, and a
//! line starting with the two-digit day closes the record. Fields are kept
//! in a [`ParserState`] that is threaded through the lines and only changes
//! when a pattern matches, so values a statement does not repeat carry into
//! the next record.

use anyhow::Result;
use ledgerlift_core::RawTransaction;
use regex::Regex;

/// Heading that opens the transaction section (matched case-insensitively).
pub const START_MARKER: &str = "transaction history";

/// Accumulated fields between lines.
///
/// Emitting a record does not reset anything: a reference or amount seen
/// for one transaction is reused by the next unless overwritten.
// TODO: offer a per-record reset once statements with unrelated consecutive
// rows show up; the carry-over is kept for compatibility with existing exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    pub date: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub amount: Option<String>,
    pub balance: Option<String>,
    pub started: bool,
}

impl ParserState {
    fn snapshot(&self) -> RawTransaction {
        RawTransaction {
            date: self.date.clone(),
            description: self.description.clone().unwrap_or_default(),
            reference: self.reference.clone(),
            amount: self.amount.clone(),
            balance: self.balance.clone(),
        }
    }
}

pub struct TransactionParser {
    year_month: Regex,
    reference: Regex,
    amount: Regex,
    balance: Regex,
    day: Regex,
}

/// Remove the first match of `re`; returns the match and the trimmed rest.
fn take_first(re: &Regex, line: &str) -> Option<(String, String)> {
    let m = re.find(line)?;
    let rest = format!("{}{}", &line[..m.start()], &line[m.end()..]);
    Some((m.as_str().to_string(), rest.trim().to_string()))
}

/// Remove every match of `re`; returns the first match and the trimmed rest.
fn take_all(re: &Regex, line: &str) -> Option<(String, String)> {
    let m = re.find(line)?;
    let rest = re.replace_all(line, "");
    Some((m.as_str().to_string(), rest.trim().to_string()))
}

impl TransactionParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            year_month: Regex::new(r"^\d{4}-\d{2}-")?,
            reference: Regex::new(r"[A-Za-z]{2,5}\d+")?,
            amount: Regex::new(r"[+-]\$[\d,]+\.\d{2}")?,
            balance: Regex::new(r"\$[\d,]+\.\d{2}")?,
            day: Regex::new(r"^\d{2}")?,
        })
    }

    /// Feed one cleaned line. Returns the updated state and the record the
    /// line completed, if any.
    pub fn step(&self, mut state: ParserState, line: &str) -> (ParserState, Option<RawTransaction>) {
        if !state.started {
            if line.to_lowercase().contains(START_MARKER) {
                state.started = true;
            }
            return (state, None);
        }

        let mut rest = line.to_string();

        if let Some((year_month, tail)) = take_first(&self.year_month, &rest) {
            state.date = Some(year_month);
            state.description = Some(tail.clone());
            rest = tail;
        }

        if let Some((reference, tail)) = take_first(&self.reference, &rest) {
            state.reference = Some(reference);
            rest = tail;
        }

        if let Some((amount, tail)) = take_all(&self.amount, &rest) {
            state.amount = Some(amount);
            rest = tail;
        }

        if let Some((balance, tail)) = take_all(&self.balance, &rest) {
            state.balance = Some(balance);
            // Text left next to the balance is the cleanest description.
            if !tail.is_empty() {
                state.description = Some(tail.clone());
            }
            rest = tail;
        }

        let Some(day) = self.day.find(&rest) else {
            return (state, None);
        };

        state
            .date
            .get_or_insert_with(String::new)
            .push_str(day.as_str());
        state
            .description
            .get_or_insert_with(String::new)
            .push_str(&rest[day.end()..]);

        let record = state.snapshot();
        (state, Some(record))
    }

    /// Parse a whole document's cleaned lines, in order.
    pub fn parse_lines<I, S>(&self, lines: I) -> Vec<RawTransaction>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (_, records) = lines.into_iter().fold(
            (ParserState::default(), Vec::new()),
            |(state, mut records), line| {
                let (state, emitted) = self.step(state, line.as_ref());
                records.extend(emitted);
                (state, records)
            },
        );
        records
    }
}
