//! ledgerlift-core: statement record types and CSV export

pub mod export;
pub mod grid;
pub mod record;

pub use export::{grid_to_csv, transactions_to_csv, write_grid, write_transactions};
pub use grid::Grid;
pub use record::{RawTransaction, TRANSACTION_COLUMNS, TransactionRecord};
