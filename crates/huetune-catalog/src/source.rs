//! The track search seam between playlist assembly and a catalog.

use async_trait::async_trait;

use huetune_core::model::Track;

use crate::error::CatalogResult;

/// Largest page a catalog search may request.
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// A track catalog that answers free-text queries.
///
/// Queries may carry field filters such as `genre:surf year:2022-2026`.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Catalog name used in logs and errors.
    fn name(&self) -> &str;

    /// Up to `limit` tracks matching `query`, in catalog order.
    async fn search_tracks(&self, query: &str, limit: u32) -> CatalogResult<Vec<Track>>;
}

/// Clamp a requested page size to what a catalog accepts.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}
