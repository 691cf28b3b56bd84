//! Image signal to music profile mapping.
//!
//! Combines the three independent signals of an image: genre matches from
//! the similarity search over contextual phrases, the colour profile, and
//! the label mood profile.

use std::sync::Arc;

use huetune_core::color;
use huetune_core::context::contextual_phrases;
use huetune_core::fusion::fuse;
use huetune_core::model::{ColorProfile, ImageSignal, MusicProfile, SimilarityResult};
use huetune_core::mood::{score_labels, MoodProfile};

use crate::error::SearchResult;
use crate::index::GenreIndex;
use crate::similarity::SimilaritySearch;

/// Number of genre matches requested from the composite query.
const GENRE_MATCHES: usize = 6;

/// Everything derived while mapping one signal.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingOutcome {
    pub profile: MusicProfile,
    /// Genre matches before fusion, most similar first.
    pub genres: Vec<SimilarityResult>,
    pub color: ColorProfile,
    pub mood: MoodProfile,
}

/// Maps an [`ImageSignal`] to a [`MusicProfile`].
#[derive(Debug, Clone)]
pub struct SmartMapper {
    search: SimilaritySearch,
}

impl SmartMapper {
    pub fn new(index: Arc<GenreIndex>) -> Self {
        Self {
            search: SimilaritySearch::new(index),
        }
    }

    /// Run the full mapping for one signal.
    ///
    /// Fails only when the genre index cannot be built or every similarity
    /// query fails.
    pub async fn map(&self, signal: &ImageSignal) -> SearchResult<MappingOutcome> {
        self.search.index().initialize().await?;

        let phrases = contextual_phrases(signal);
        log::debug!("Contextual phrases: {:?}", phrases);

        let genres = self
            .search
            .rank_from_label_set(&phrases, GENRE_MATCHES)
            .await?;
        let color = color::analyze(signal.color);
        let mood = score_labels(&signal.labels);
        let profile = fuse(&genres, &color, &mood);

        log_summary(&genres, &color, &mood, &profile);

        Ok(MappingOutcome {
            profile,
            genres,
            color,
            mood,
        })
    }
}

fn log_summary(
    genres: &[SimilarityResult],
    color: &ColorProfile,
    mood: &MoodProfile,
    profile: &MusicProfile,
) {
    let detected = genres
        .iter()
        .map(|g| format!("{} ({:.1}%)", g.genre, g.similarity * 100.0))
        .collect::<Vec<_>>()
        .join(", ");
    log::info!("Detected genres: {}", detected);
    log::debug!(
        "Colour profile: energy {:.2}, valence {:.2}, acousticness {:.2}",
        color.energy,
        color.valence,
        color.acousticness
    );
    log::debug!(
        "Mood: {} (confidence {:.2})",
        mood.dominant_mood,
        mood.confidence
    );
    log::info!(
        "Music profile: energy {:.2}, valence {:.2}, acousticness {:.2}, seeds [{}]",
        profile.energy,
        profile.valence,
        profile.acousticness,
        profile.genre_seeds.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use huetune_core::model::Rgb;
    use huetune_core::mood::Mood;

    use crate::embedding::EmbeddingProvider;
    use crate::error::SearchError;

    /// Scores text on two axes: "coastal" words and everything else.
    #[derive(Debug)]
    struct CoastalProvider;

    #[async_trait]
    impl EmbeddingProvider for CoastalProvider {
        fn name(&self) -> &str {
            "coastal"
        }

        async fn embed(&self, text: &str) -> SearchResult<Vec<f32>> {
            let coastal = ["surf", "beach", "ocean", "sea", "wave", "coast"]
                .iter()
                .filter(|w| text.contains(*w))
                .count() as f32;
            Ok(vec![coastal, 1.0])
        }
    }

    #[derive(Debug)]
    struct DownProvider;

    #[async_trait]
    impl EmbeddingProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        async fn embed(&self, _text: &str) -> SearchResult<Vec<f32>> {
            Err(SearchError::Http {
                source_name: "down".to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_map_beach_signal() {
        let index = Arc::new(GenreIndex::with_vocabulary(
            Arc::new(CoastalProvider),
            ["surf rock", "ocean ambient", "metal", "jazz"],
        ));
        let mapper = SmartMapper::new(index);
        let signal = ImageSignal::new(["beach", "ocean"], Rgb::new(180, 200, 230));

        let outcome = mapper.map(&signal).await.unwrap();

        assert_eq!(outcome.mood.dominant_mood, Mood::Calm);
        assert!(outcome.profile.valence > 0.5);
        assert!(outcome.profile.acousticness >= 0.8);
        assert_eq!(outcome.profile.genre_seeds[0], "surf rock");
        assert!(outcome.profile.genre_seeds.len() <= 4);
        assert!(outcome.genres.len() <= GENRE_MATCHES);
    }

    #[tokio::test]
    async fn test_map_fails_when_provider_down() {
        let index = Arc::new(GenreIndex::with_vocabulary(Arc::new(DownProvider), ["pop"]));
        let mapper = SmartMapper::new(Arc::clone(&index));
        let signal = ImageSignal::new(["beach"], Rgb::new(0, 0, 0));

        let err = mapper.map(&signal).await.unwrap_err();
        assert!(err.is_initialization());
        assert!(!index.is_initialized());
    }
}
