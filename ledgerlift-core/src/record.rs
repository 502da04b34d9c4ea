//! Transaction record types shared by both extraction paths

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column names of the exported transaction table, in order.
pub const TRANSACTION_COLUMNS: [&str; 5] = ["Date", "Description", "Reference", "Amount", "Balance"];

/// A transaction as assembled by the line parser, before any field is typed.
///
/// Every field holds the exact text matched in the statement, e.g.
/// `date = "2024-01-15"`, `amount = "-$1,204.50"`, `balance = "$987.50"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawTransaction {
    pub date: Option<String>,
    pub description: String,
    pub reference: Option<String>,
    pub amount: Option<String>,
    pub balance: Option<String>,
}

/// A normalized statement row. `None` marks a field that was missing or
/// could not be parsed.
///
/// Money is `f64`: exact to the cent up to about 15 significant digits
/// (balances below $10 trillion). Larger values round in the last cent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// Posting date (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    /// Free text, possibly assembled from more than one line
    pub description: String,
    /// Alphanumeric transaction code, e.g. `AB1234`
    pub reference: Option<String>,
    /// Negative = debit, positive = credit
    pub amount: Option<f64>,
    /// Running balance after the transaction
    pub balance: Option<f64>,
}

impl TransactionRecord {
    /// Returns true if this is a debit (negative amount)
    pub fn is_debit(&self) -> bool {
        self.amount.is_some_and(|a| a < 0.0)
    }

    /// Returns true if this is a credit (positive amount)
    pub fn is_credit(&self) -> bool {
        self.amount.is_some_and(|a| a > 0.0)
    }
}
