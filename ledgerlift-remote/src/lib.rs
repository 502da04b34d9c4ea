//! ledgerlift-remote: statement conversion through a remote document service.
//!
//! The service returns a JSON block tree; table blocks carry their content
//! as HTML, which is parsed and stacked into a single [`Grid`].

pub mod blocks;
pub mod client;
pub mod concat;
pub mod error;
pub mod html_table;

pub use blocks::{collect_table_blocks, table_html};
pub use client::{CheckResponse, JobStatus, PollPolicy, RemoteClient, RemoteConfig, poll_until_complete};
pub use concat::concat_grids;
pub use error::RemoteError;
pub use html_table::HtmlTableParser;

use ledgerlift_core::Grid;
use serde_json::Value;

/// Turn a converted document tree into one table.
pub fn tables_from_document(doc: &Value) -> Result<Grid, RemoteError> {
    let html = table_html(doc);
    if html.is_empty() {
        return Err(RemoteError::NoTables);
    }

    let parser = HtmlTableParser::new()?;
    let grids: Vec<Grid> = html
        .iter()
        .filter_map(|h| parser.parse(h))
        .filter(|g| !g.is_empty())
        .collect();

    log::info!("{} table blocks, {} with rows", html.len(), grids.len());

    if grids.is_empty() {
        return Err(RemoteError::UnparseableTables);
    }

    Ok(concat_grids(grids))
}

/// Upload `pdf`, wait for the service, and return the stacked tables.
pub async fn convert_remote(
    client: &RemoteClient,
    pdf: Vec<u8>,
    filename: &str,
) -> Result<Grid, RemoteError> {
    let doc = client.convert(pdf, filename).await?;
    tables_from_document(&doc)
}
