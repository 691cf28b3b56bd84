//! Ranking free text against the genre index.

use std::collections::HashMap;
use std::sync::Arc;

use huetune_core::model::SimilarityResult;
use huetune_core::vector::cosine_similarity;

use crate::error::{SearchError, SearchResult};
use crate::index::GenreIndex;

/// How many leading phrases are also ranked on their own.
const INDIVIDUAL_PHRASES: usize = 3;

/// Results kept per individually ranked phrase.
const INDIVIDUAL_TOP_K: usize = 3;

/// Similarity queries over a shared [`GenreIndex`].
#[derive(Debug, Clone)]
pub struct SimilaritySearch {
    index: Arc<GenreIndex>,
}

impl SimilaritySearch {
    pub fn new(index: Arc<GenreIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &GenreIndex {
        &self.index
    }

    /// The `top_k` vocabulary entries closest to `text`, most similar
    /// first. Equal similarities keep vocabulary order.
    pub async fn rank(&self, text: &str, top_k: usize) -> SearchResult<Vec<SimilarityResult>> {
        let entries = self.index.entries().await?;
        let query = self.index.provider().embed(text).await?;

        if let Some(first) = entries.first() {
            if first.vector.len() != query.len() {
                return Err(SearchError::DimensionMismatch {
                    expected: first.vector.len(),
                    actual: query.len(),
                });
            }
        }

        let mut results: Vec<SimilarityResult> = entries
            .iter()
            .map(|entry| {
                SimilarityResult::new(entry.label.clone(), cosine_similarity(&query, &entry.vector))
            })
            .collect();
        sort_descending(&mut results);
        results.truncate(top_k);
        Ok(results)
    }

    /// Rank a list of query phrases as one composite query.
    ///
    /// The first three phrases are ranked individually (top three each) and
    /// all phrases joined are ranked once (top `2 * top_k`). Results are
    /// merged by genre keeping the maximum similarity, then the best
    /// `top_k` are returned. A failing sub-query is logged and skipped; the
    /// call fails only when every sub-query failed.
    pub async fn rank_from_label_set<S: AsRef<str>>(
        &self,
        phrases: &[S],
        top_k: usize,
    ) -> SearchResult<Vec<SimilarityResult>> {
        if phrases.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        self.index.initialize().await?;

        let mut batches: Vec<Vec<SimilarityResult>> = Vec::new();
        let mut last_error: Option<SearchError> = None;

        for phrase in phrases.iter().take(INDIVIDUAL_PHRASES) {
            match self.rank(phrase.as_ref(), INDIVIDUAL_TOP_K).await {
                Ok(results) => batches.push(results),
                Err(e) => {
                    log::warn!("Genre ranking failed for '{}': {}", phrase.as_ref(), e);
                    last_error = Some(e);
                }
            }
        }

        let joined = phrases
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        match self.rank(&joined, top_k.saturating_mul(2)).await {
            Ok(results) => batches.push(results),
            Err(e) => {
                log::warn!("Genre ranking failed for combined query: {}", e);
                last_error = Some(e);
            }
        }

        if batches.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let mut merged = merge_by_max(batches);
        merged.truncate(top_k);
        Ok(merged)
    }
}

/// Merge result sets keyed by genre, keeping the highest similarity seen,
/// and sort the union descending. Ties keep first-seen order.
pub fn merge_by_max<I>(batches: I) -> Vec<SimilarityResult>
where
    I: IntoIterator<Item = Vec<SimilarityResult>>,
{
    let mut merged: Vec<SimilarityResult> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for result in batches.into_iter().flatten() {
        if let Some(&at) = positions.get(&result.genre) {
            let kept = &mut merged[at];
            if result.similarity > kept.similarity {
                kept.similarity = result.similarity;
            }
        } else {
            positions.insert(result.genre.clone(), merged.len());
            merged.push(result);
        }
    }

    sort_descending(&mut merged);
    merged
}

fn sort_descending(results: &mut [SimilarityResult]) {
    // `sort_by` is stable, so equal scores keep their incoming order
    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::embedding::EmbeddingProvider;

    /// Embeds by looking the text up in a fixed table; unknown text fails.
    #[derive(Debug)]
    struct TableProvider {
        table: Vec<(&'static str, Vec<f32>)>,
        seen: Mutex<Vec<String>>,
    }

    impl TableProvider {
        fn new(table: Vec<(&'static str, Vec<f32>)>) -> Self {
            Self {
                table,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for TableProvider {
        fn name(&self) -> &str {
            "table"
        }

        async fn embed(&self, text: &str) -> SearchResult<Vec<f32>> {
            self.seen.lock().unwrap().push(text.to_string());
            self.table
                .iter()
                .find(|(key, _)| *key == text)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| SearchError::Http {
                    source_name: "table".to_string(),
                    message: format!("no vector for '{text}'"),
                })
        }
    }

    fn search(table: Vec<(&'static str, Vec<f32>)>, vocabulary: &[&str]) -> SimilaritySearch {
        let provider = Arc::new(TableProvider::new(table));
        SimilaritySearch::new(Arc::new(GenreIndex::with_vocabulary(
            provider,
            vocabulary.iter().copied(),
        )))
    }

    fn genres(results: &[SimilarityResult]) -> Vec<&str> {
        results.iter().map(|r| r.genre.as_str()).collect()
    }

    fn vocab_table() -> Vec<(&'static str, Vec<f32>)> {
        vec![
            ("surf rock", vec![1.0, 0.0, 0.0]),
            ("chill", vec![0.0, 1.0, 0.0]),
            ("ambient", vec![0.0, 1.0, 0.0]),
            ("metal", vec![0.0, 0.0, 1.0]),
        ]
    }

    #[tokio::test]
    async fn test_rank_sorted_descending_and_truncated() {
        let mut table = vocab_table();
        table.push(("beach", vec![0.9, 0.4, 0.0]));
        let search = search(table, &["surf rock", "chill", "ambient", "metal"]);

        let results = search.rank("beach", 3).await.unwrap();
        assert_eq!(genres(&results), vec!["surf rock", "chill", "ambient"]);
        assert!(results
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity));
    }

    #[tokio::test]
    async fn test_rank_ties_keep_vocabulary_order() {
        let mut table = vocab_table();
        table.push(("calm", vec![0.0, 1.0, 0.0]));
        let search = search(table, &["surf rock", "chill", "ambient", "metal"]);

        let results = search.rank("calm", 2).await.unwrap();
        assert_eq!(genres(&results), vec!["chill", "ambient"]);
        assert!((results[0].similarity - results[1].similarity).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_rank_limited_by_vocabulary_size() {
        let mut table = vocab_table();
        table.push(("q", vec![1.0, 1.0, 1.0]));
        let search = search(table, &["surf rock", "chill", "ambient", "metal"]);

        let results = search.rank("q", 50).await.unwrap();
        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn test_rank_zero_vector_scores_zero() {
        let mut table = vocab_table();
        table.push(("silence", vec![0.0, 0.0, 0.0]));
        let search = search(table, &["surf rock", "chill", "ambient", "metal"]);

        let results = search.rank("silence", 4).await.unwrap();
        assert!(results.iter().all(|r| r.similarity == 0.0));
        assert_eq!(genres(&results), vec!["surf rock", "chill", "ambient", "metal"]);
    }

    #[tokio::test]
    async fn test_rank_dimension_mismatch() {
        let mut table = vocab_table();
        table.push(("short", vec![1.0]));
        let search = search(table, &["surf rock", "chill", "ambient", "metal"]);

        let err = search.rank("short", 2).await.unwrap_err();
        assert!(matches!(err, SearchError::DimensionMismatch { expected: 3, actual: 1 }));
    }

    #[tokio::test]
    async fn test_rank_fails_when_index_cannot_build() {
        // "metal" has no vector, so the index build fails
        let search = search(vec![("surf rock", vec![1.0])], &["surf rock", "metal"]);
        let err = search.rank("surf rock", 1).await.unwrap_err();
        assert!(err.is_initialization());
        assert!(!search.index().is_initialized());
    }

    #[test]
    fn test_merge_by_max_keeps_maximum_without_duplicates() {
        let merged = merge_by_max(vec![
            vec![
                SimilarityResult::new("chill", 0.5),
                SimilarityResult::new("lofi", 0.4),
            ],
            vec![
                SimilarityResult::new("lofi", 0.9),
                SimilarityResult::new("chill", 0.2),
                SimilarityResult::new("ambient", 0.3),
            ],
        ]);
        assert_eq!(genres(&merged), vec!["lofi", "chill", "ambient"]);
        assert!((merged[0].similarity - 0.9).abs() < f32::EPSILON);
        assert!((merged[1].similarity - 0.5).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_rank_from_label_set_merges_individual_and_joined() {
        let mut table = vocab_table();
        table.push(("beach", vec![1.0, 0.0, 0.0]));
        table.push(("ocean", vec![0.0, 1.0, 0.0]));
        table.push(("beach ocean", vec![0.5, 0.5, 0.1]));
        let search = search(table, &["surf rock", "chill", "ambient", "metal"]);

        let results = search
            .rank_from_label_set(&["beach", "ocean"], 3)
            .await
            .unwrap();

        // both individual hits reach 1.0; the joined query alone scores lower
        assert_eq!(genres(&results), vec!["surf rock", "chill", "ambient"]);
        assert!((results[0].similarity - 1.0).abs() < 1e-6);
        assert!((results[1].similarity - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_rank_from_label_set_only_first_three_individually() {
        let provider = Arc::new(TableProvider::new(vec![
            ("surf rock", vec![1.0, 0.0]),
            ("chill", vec![0.0, 1.0]),
            ("a", vec![1.0, 0.0]),
            ("b", vec![1.0, 0.0]),
            ("c", vec![1.0, 0.0]),
            ("d", vec![1.0, 0.0]),
            ("a b c d", vec![0.0, 1.0]),
        ]));
        let search = SimilaritySearch::new(Arc::new(GenreIndex::with_vocabulary(
            Arc::<TableProvider>::clone(&provider),
            ["surf rock", "chill"],
        )));

        search
            .rank_from_label_set(&["a", "b", "c", "d"], 2)
            .await
            .unwrap();

        let seen = provider.seen.lock().unwrap().clone();
        assert!(seen.contains(&"c".to_string()));
        assert!(!seen.contains(&"d".to_string()));
        assert!(seen.contains(&"a b c d".to_string()));
    }

    #[tokio::test]
    async fn test_rank_from_label_set_skips_failed_phrase() {
        let mut table = vocab_table();
        table.push(("ocean", vec![0.0, 1.0, 0.0]));
        table.push(("unknown ocean", vec![0.0, 0.0, 1.0]));
        let search = search(table, &["surf rock", "chill", "ambient", "metal"]);

        let results = search
            .rank_from_label_set(&["unknown", "ocean"], 3)
            .await
            .unwrap();
        assert_eq!(genres(&results), vec!["chill", "ambient", "metal"]);
    }

    #[tokio::test]
    async fn test_rank_from_label_set_fails_when_all_queries_fail() {
        let search = search(vocab_table(), &["surf rock", "chill", "ambient", "metal"]);
        let err = search
            .rank_from_label_set(&["nothing", "known"], 2)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Http { .. }));
    }

    #[tokio::test]
    async fn test_rank_from_label_set_empty_input() {
        let search = search(vocab_table(), &["surf rock", "chill", "ambient", "metal"]);
        let results = search
            .rank_from_label_set::<&str>(&[], 3)
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
