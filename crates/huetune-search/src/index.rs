//! The in-memory genre embedding index.

use std::sync::Arc;

use tokio::sync::OnceCell;

use huetune_core::taxonomy::GENRE_VOCABULARY;

use crate::embedding::EmbeddingProvider;
use crate::error::{SearchError, SearchResult};

/// One vocabulary descriptor and its embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreEntry {
    pub label: String,
    pub vector: Vec<f32>,
}

/// The genre vocabulary with one embedding vector per entry.
///
/// Vectors are computed on the first [`initialize`](Self::initialize) call
/// and cached for the lifetime of the index. Concurrent first callers share
/// one build; a failed build leaves the index empty so a later call can
/// retry.
pub struct GenreIndex {
    provider: Arc<dyn EmbeddingProvider>,
    vocabulary: Vec<String>,
    entries: OnceCell<Vec<GenreEntry>>,
}

impl std::fmt::Debug for GenreIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenreIndex")
            .field("provider", &self.provider.name())
            .field("vocabulary", &self.vocabulary.len())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl GenreIndex {
    /// An index over the built-in genre vocabulary.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_vocabulary(provider, GENRE_VOCABULARY.iter().copied())
    }

    /// An index over a custom vocabulary. Repeated labels keep their first
    /// position.
    pub fn with_vocabulary<I, S>(provider: Arc<dyn EmbeddingProvider>, vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in vocabulary {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }

        Self {
            provider,
            vocabulary: unique,
            entries: OnceCell::new(),
        }
    }

    /// Embed the vocabulary if that has not happened yet.
    ///
    /// Errors are wrapped in [`SearchError::Initialization`].
    pub async fn initialize(&self) -> SearchResult<()> {
        self.entries().await.map(|_| ())
    }

    /// The indexed entries in vocabulary order, building them on first use.
    pub async fn entries(&self) -> SearchResult<&[GenreEntry]> {
        let entries = self
            .entries
            .get_or_try_init(|| self.build())
            .await
            .map_err(SearchError::initialization)?;
        Ok(entries.as_slice())
    }

    pub fn is_initialized(&self) -> bool {
        self.entries.initialized()
    }

    /// Number of vocabulary entries.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Vector dimensionality, once initialised.
    pub fn dimension(&self) -> Option<usize> {
        self.entries
            .get()
            .and_then(|entries| entries.first())
            .map(|entry| entry.vector.len())
    }

    pub(crate) fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    async fn build(&self) -> SearchResult<Vec<GenreEntry>> {
        log::info!(
            "Building genre index: {} descriptors via {}",
            self.vocabulary.len(),
            self.provider.name()
        );

        let vectors = self.provider.embed_batch(&self.vocabulary).await?;
        if vectors.len() != self.vocabulary.len() {
            return Err(SearchError::EmptyResponse {
                source_name: self.provider.name().to_string(),
            });
        }

        let dimension = vectors.first().map_or(0, Vec::len);
        if let Some(odd) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(SearchError::DimensionMismatch {
                expected: dimension,
                actual: odd.len(),
            });
        }

        let entries: Vec<GenreEntry> = self
            .vocabulary
            .iter()
            .cloned()
            .zip(vectors)
            .map(|(label, vector)| GenreEntry { label, vector })
            .collect();

        log::info!(
            "Genre index ready: {} entries, dimension {}",
            entries.len(),
            dimension
        );
        Ok(entries)
    }
}
