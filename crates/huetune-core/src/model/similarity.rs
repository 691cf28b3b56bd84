use serde::{Deserialize, Serialize};

/// A genre descriptor scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub genre: String,
    /// Cosine similarity in `-1.0..=1.0`.
    pub similarity: f32,
}

impl SimilarityResult {
    #[must_use]
    pub fn new(genre: impl Into<String>, similarity: f32) -> Self {
        Self {
            genre: genre.into(),
            similarity,
        }
    }
}
