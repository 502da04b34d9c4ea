//! CSV export for transaction tables and untyped grids.
//!
//! Transactions are written with the fixed header
//! `Date,Description,Reference,Amount,Balance`. Dates use `YYYY-MM-DD`,
//! amounts and balances are plain decimals with two fraction digits, and
//! missing values are empty cells.

use anyhow::{Context, Result};
use std::io::Write;

use crate::grid::Grid;
use crate::record::{TRANSACTION_COLUMNS, TransactionRecord};

fn format_money(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Write `records` as CSV to `writer`, header first.
pub fn write_transactions<W: Write>(writer: W, records: &[TransactionRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TRANSACTION_COLUMNS)
        .context("write csv header")?;

    for record in records {
        let date = record
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        wtr.write_record([
            date.as_str(),
            record.description.as_str(),
            record.reference.as_deref().unwrap_or(""),
            format_money(record.amount).as_str(),
            format_money(record.balance).as_str(),
        ])
        .context("write csv row")?;
    }

    wtr.flush().context("flush csv")?;
    Ok(())
}

/// Render `records` to an in-memory CSV string.
pub fn transactions_to_csv(records: &[TransactionRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_transactions(&mut buf, records)?;
    Ok(String::from_utf8(buf).context("csv output is not utf-8")?)
}

/// Write a grid as CSV: its headers, then every row.
pub fn write_grid<W: Write>(writer: W, grid: &Grid) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&grid.headers).context("write csv header")?;
    for row in &grid.rows {
        wtr.write_record(row).context("write csv row")?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}

pub fn grid_to_csv(grid: &Grid) -> Result<String> {
    let mut buf = Vec::new();
    write_grid(&mut buf, grid)?;
    Ok(String::from_utf8(buf).context("csv output is not utf-8")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 15),
                description: "Store Purchase".to_string(),
                reference: Some("AB1234".to_string()),
                amount: Some(-12.5),
                balance: Some(987.5),
            },
            TransactionRecord {
                date: None,
                description: "Coffee, large".to_string(),
                reference: None,
                amount: None,
                balance: Some(1234.56),
            },
        ]
    }

    #[test]
    fn test_transactions_csv() {
        let csv = transactions_to_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Description,Reference,Amount,Balance");
        assert_eq!(lines[1], "2024-01-15,Store Purchase,AB1234,-12.50,987.50");
        // Commas in the description force quoting; missing fields stay empty.
        assert_eq!(lines[2], ",\"Coffee, large\",,,1234.56");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_header_round_trip() {
        let csv = transactions_to_csv(&[]).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, TRANSACTION_COLUMNS);
        assert_eq!(rdr.records().count(), 0);
    }

    #[test]
    fn test_grid_csv() {
        let mut grid = Grid::new(vec!["Date".into(), "Amount".into()]);
        grid.push_row(vec!["01/02".into(), "5.00".into()]);
        grid.push_row(vec![String::new(), String::new()]);

        let csv = grid_to_csv(&grid).unwrap();
        assert_eq!(csv, "Date,Amount\n01/02,5.00\n,\n");
    }
}
