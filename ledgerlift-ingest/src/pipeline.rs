//! Local extraction path: page text → cleaned lines → parsed rows → typed records.

use anyhow::Result;
use ledgerlift_core::TransactionRecord;
use std::path::Path;

use crate::clean::LineCleaner;
use crate::normalize::normalize;
use crate::parser::TransactionParser;
use crate::pdf::{extract_page_texts, extract_page_texts_from_path, lines_from_pages};

/// Owns the compiled patterns; every call parses with a fresh state, so one
/// pipeline can convert any number of documents.
pub struct LocalPipeline {
    cleaner: LineCleaner,
    parser: TransactionParser,
}

impl LocalPipeline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cleaner: LineCleaner::new()?,
            parser: TransactionParser::new()?,
        })
    }

    pub fn convert_lines<I, S>(&self, lines: I) -> Vec<TransactionRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cleaned = self.cleaner.clean_lines(lines);
        normalize(self.parser.parse_lines(&cleaned))
    }

    pub fn convert_text(&self, text: &str) -> Vec<TransactionRecord> {
        self.convert_lines(text.lines())
    }

    pub fn convert_pages(&self, pages: &[Option<String>]) -> Vec<TransactionRecord> {
        self.convert_lines(lines_from_pages(pages))
    }

    pub fn convert_pdf_bytes(&self, bytes: &[u8]) -> Result<Vec<TransactionRecord>> {
        let pages = extract_page_texts(bytes)?;
        Ok(self.convert_pages(&pages))
    }

    pub fn convert_pdf_path(&self, path: impl AsRef<Path>) -> Result<Vec<TransactionRecord>> {
        let pages = extract_page_texts_from_path(path)?;
        Ok(self.convert_pages(&pages))
    }
}
