/// Errors from the remote document-conversion path.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured API key cannot be sent as a header.
    #[error("invalid API key: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    /// The submit response did not say where to poll.
    #[error("submit response has no request_check_url")]
    MissingCheckUrl,

    /// The service reported `failed`.
    #[error("remote conversion failed: {0}")]
    ConversionFailed(String),

    /// The service never reported `complete` within the poll budget.
    #[error("remote conversion did not complete after {attempts} polls")]
    Timeout { attempts: u32 },

    /// The converted document has no table blocks.
    #[error("no tables found in the document")]
    NoTables,

    /// Table blocks were found but none contained rows.
    #[error("tables were found but could not be parsed")]
    UnparseableTables,

    #[error("invalid CSS selector: {0}")]
    Selector(String),
}
