//! Per-page plain text extraction with lopdf.
//!
//! Text is rebuilt from the page's content operators so that line moves
//! inside a text object (`Td`, `TD`, `T*`, `'`, `"`, a new `Tm` row) become
//! line breaks; the statement parser depends on them.

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

/// Kerning in a `TJ` array below this (thousandths of an em) reads as a word gap.
const TJ_SPACE_THRESHOLD: f32 = -100.0;

/// Extract the text of every page, in page order.
///
/// A page with no text (scanned image, blank page) is `None`. A page whose
/// content cannot be read fails the whole document.
pub fn extract_page_texts(bytes: &[u8]) -> Result<Vec<Option<String>>> {
    let doc = Document::load_mem(bytes).context("load pdf")?;
    let pages = doc.get_pages();
    log::debug!("pdf has {} pages", pages.len());

    let mut out = Vec::with_capacity(pages.len());
    for (page_num, page_id) in pages {
        let text = page_text(&doc, page_id)
            .with_context(|| format!("extract text from page {page_num}"))?;
        if text.trim().is_empty() {
            log::debug!("page {page_num}: no extractable text");
            out.push(None);
        } else {
            out.push(Some(text));
        }
    }

    Ok(out)
}

pub fn extract_page_texts_from_path(path: impl AsRef<Path>) -> Result<Vec<Option<String>>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    extract_page_texts(&bytes).with_context(|| format!("extract text from {}", path.display()))
}

fn page_text(doc: &Document, page_id: ObjectId) -> Result<String> {
    let encodings: BTreeMap<Vec<u8>, &str> = doc
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect();
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;
    text_from_operations(&content.operations, &encodings)
}

/// Replay text-showing and text-positioning operators into plain lines.
fn text_from_operations(ops: &[Operation], encodings: &BTreeMap<Vec<u8>, &str>) -> Result<String> {
    let mut text = String::new();
    let mut encoding = None;
    let mut row: Option<f32> = None;

    for op in ops {
        match op.operator.as_str() {
            "Tf" => {
                let font = op.operands.first().context("Tf without a font name")?.as_name()?;
                encoding = encodings.get(font).copied();
            }
            "Tj" | "TJ" => show_text(&mut text, encoding, &op.operands),
            "'" | "\"" => {
                break_line(&mut text);
                show_text(&mut text, encoding, &op.operands);
            }
            "T*" | "ET" => break_line(&mut text),
            "Td" | "TD" => {
                let dy = op.operands.get(1).and_then(|o| o.as_float().ok()).unwrap_or(0.0);
                if dy != 0.0 {
                    break_line(&mut text);
                } else {
                    word_gap(&mut text);
                }
            }
            "Tm" => {
                let y = op.operands.get(5).and_then(|o| o.as_float().ok());
                if y != row {
                    break_line(&mut text);
                }
                row = y;
            }
            _ => {}
        }
    }

    Ok(text)
}

fn show_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)),
            Object::Array(items) => show_text(text, encoding, items),
            Object::Integer(_) | Object::Real(_) => {
                if operand.as_float().is_ok_and(|k| k < TJ_SPACE_THRESHOLD) {
                    word_gap(text);
                }
            }
            _ => {}
        }
    }
}

fn break_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn word_gap(text: &mut String) {
    if !text.is_empty() && !text.ends_with([' ', '\n']) {
        text.push(' ');
    }
}

/// Split page texts into raw lines. Pages without text contribute nothing.
pub fn lines_from_pages(pages: &[Option<String>]) -> Vec<String> {
    pages
        .iter()
        .flatten()
        .flat_map(|text| text.lines())
        .map(str::to_string)
        .collect()
}
