//! Search error types.

use thiserror::Error;

/// Errors raised while embedding text or querying the genre index.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The embedding provider answered with a failure status.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// A response from the embedding provider could not be parsed.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// A vector did not have the dimensionality of the index.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The provider returned no vectors (or fewer than requested).
    #[error("empty embedding response from {source_name}")]
    EmptyResponse { source_name: String },

    /// Building the genre index failed; the index stays uninitialised.
    #[error("genre index initialization failed: {0}")]
    Initialization(Box<SearchError>),
}

impl SearchError {
    /// Wrap an error raised while building the index.
    pub fn initialization(source: Self) -> Self {
        match source {
            already @ Self::Initialization(_) => already,
            other => Self::Initialization(Box::new(other)),
        }
    }

    /// Returns `true` for failures of the index build.
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::Initialization(_))
    }
}

/// Convenience alias for search results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
