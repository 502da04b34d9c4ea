//! Typed field conversion for parsed statement rows.
//!
//! Runs over the finished table. A field that fails to parse becomes `None`;
//! nothing here can fail the batch.

use chrono::NaiveDate;
use ledgerlift_core::{RawTransaction, TransactionRecord};

/// Parse a currency token such as `-$1,204.50` or `$987.50`.
pub fn parse_money(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| !matches!(c, ',' | '$')).collect();
    digits
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse an assembled `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn normalize(raw: Vec<RawTransaction>) -> Vec<TransactionRecord> {
    raw.into_iter()
        .map(|txn| TransactionRecord {
            date: txn.date.as_deref().and_then(parse_date),
            description: txn.description,
            reference: txn.reference,
            amount: txn.amount.as_deref().and_then(parse_money),
            balance: txn.balance.as_deref().and_then(parse_money),
        })
        .collect()
}
