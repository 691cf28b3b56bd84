//! Catalog error types.

use thiserror::Error;

/// Errors raised while talking to the track catalog or assembling a
/// playlist.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered with a failure status.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The catalog refused the request itself (a 4xx other than 401/429).
    #[error("request rejected by {source_name} with status {status}")]
    Rejected { source_name: String, status: u16 },

    /// The catalog returned a rate-limit response.
    #[error("rate limited by {source_name}")]
    RateLimited { source_name: String },

    /// The catalog rejected the credentials or bearer token.
    #[error("unauthorized by {source_name}")]
    Unauthorized { source_name: String },

    /// A response from the catalog could not be parsed.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Every catalog query of an assembly failed.
    #[error("catalog search failed ({attempted} queries attempted)")]
    AllQueriesFailed { attempted: usize },

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Returns `true` when the error is transient and the operation may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } | Self::RateLimited { .. } => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

impl From<huetune_core::Error> for CatalogError {
    fn from(e: huetune_core::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
