//! Line cleanup for PDF-extracted text.
//!
//! Text extractors leave stray one-letter tokens behind (checkbox glyphs,
//! split ligatures, column markers). Those are removed before parsing.

use anyhow::Result;
use regex::Regex;

pub struct LineCleaner {
    single_letter: Regex,
}

impl LineCleaner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            single_letter: Regex::new(r"\b[A-Za-z]\b")?,
        })
    }

    /// Clean one line. Returns `None` if nothing is left.
    pub fn clean_line(&self, line: &str) -> Option<String> {
        let cleaned = self.single_letter.replace_all(line, "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.to_string())
        }
    }

    /// Clean every line, dropping the ones that end up empty. Order is kept.
    pub fn clean_lines<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.clean_line(line.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_removes_single_letters() {
        let cleaner = LineCleaner::new().unwrap();
        assert_eq!(
            cleaner.clean_line("a Store Purchase b AB1234 c").as_deref(),
            Some("Store Purchase  AB1234")
        );
        assert_eq!(cleaner.clean_line("x-y 15").as_deref(), Some("- 15"));
        // Letters that are part of a longer word stay.
        assert_eq!(cleaner.clean_line("AB1234").as_deref(), Some("AB1234"));
    }

    #[test]
    fn test_drops_empty_lines() {
        let cleaner = LineCleaner::new().unwrap();
        let out = cleaner.clean_lines(["  ", "b", "Transaction History", " q  z ", "15"]);
        assert_eq!(out, vec!["Transaction History", "15"]);
    }

    proptest! {
        #[test]
        fn prop_no_isolated_letters_or_blank_lines(
            lines in prop::collection::vec("[a-zA-Z0-9 $.,+-]{0,40}", 0..20)
        ) {
            let cleaner = LineCleaner::new().unwrap();
            let single = Regex::new(r"\b[A-Za-z]\b").unwrap();
            for line in cleaner.clean_lines(&lines) {
                prop_assert!(!line.trim().is_empty());
                prop_assert!(!single.is_match(&line), "isolated letter left in {:?}", line);
            }
        }
    }
}
