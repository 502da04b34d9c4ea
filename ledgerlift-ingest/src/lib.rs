//! ledgerlift-ingest: bank statement PDF text → transaction records.

pub mod clean;
pub mod normalize;
pub mod parser;
pub mod pdf;
pub mod pipeline;

pub use clean::LineCleaner;
pub use normalize::normalize;
pub use parser::{ParserState, TransactionParser, START_MARKER};
pub use pdf::{extract_page_texts, lines_from_pages};
pub use pipeline::LocalPipeline;
