//! Error types for the fetch boundary.
//!
//! Only invocation-fatal failures live here. Row-level problems (bad dates,
//! non-numeric cells) never become errors; the normalizer drops or marks
//! them instead.

use thiserror::Error;

// ---

/// Failure to obtain a usable table from the configured source.
#[derive(Debug, Error)]
pub enum SourceError {
    // ---
    #[error("could not reach data source: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("data source answered HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("data source did not return a readable table: {0}")]
    Format(#[from] csv::Error),

    #[error("required column '{0}' not found in table")]
    MissingColumn(&'static str),
}

/// Coarse failure class shown to the user next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Connection,
    Format,
}

impl SourceError {
    // ---
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::Connection(_) | SourceError::Status { .. } => ErrorKind::Connection,
            SourceError::Format(_) | SourceError::MissingColumn(_) => ErrorKind::Format,
        }
    }
}
