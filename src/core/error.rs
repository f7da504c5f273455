//! Error taxonomy shared by the playlist pipeline and the history cache.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// User input did not contain a recognisable playlist identifier
    #[error("{0}")]
    InvalidIdentifier(String),
    /// The catalog returned no playlist for the identifier (missing or private)
    #[error("playlist not found or private: {0}")]
    NotFound(String),
    /// Any transport or HTTP-level failure while talking to the catalog
    #[error("failed to fetch playlist data: {0}")]
    FetchFailed(String),
    /// Persisted history could not be decoded
    #[error("stored history is corrupt: {0}")]
    StorageCorrupt(String),
}

impl PipelineError {
    pub fn fetch_failed(detail: impl Into<String>) -> Self {
        PipelineError::FetchFailed(detail.into())
    }

    /// Whether the failure is worth offering the user a retry for
    pub fn is_retryable(&self) -> bool {
        matches!(self, PipelineError::FetchFailed(_))
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        PipelineError::FetchFailed(e.to_string())
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
