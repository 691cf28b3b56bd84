//! Profile fusion: merges genre matches, the colour profile, and the mood
//! profile into one [`MusicProfile`].

use crate::model::{ColorProfile, MusicProfile, SimilarityResult};
use crate::mood::{Mood, MoodProfile};

/// Generic genres appended when the similarity search finds too few.
pub const FALLBACK_GENRES: &[&str] = &["indie", "alternative"];

/// Maximum number of genre seeds in a profile.
pub const MAX_GENRE_SEEDS: usize = 4;

/// Below this many matched genres, one fallback genre is appended.
const MIN_MATCHED_GENRES: usize = 3;

/// Additive shift applied for a dominant mood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
}

impl Adjustment {
    const fn new(energy: f64, valence: f64, acousticness: f64) -> Self {
        Self {
            energy,
            valence,
            acousticness,
        }
    }
}

/// The fixed adjustment for each mood.
#[must_use]
pub const fn adjustment_for(mood: Mood) -> Adjustment {
    match mood {
        Mood::Energetic => Adjustment::new(0.4, 0.3, -0.4),
        Mood::Calm => Adjustment::new(-0.3, 0.2, 0.3),
        Mood::Urban => Adjustment::new(0.3, 0.1, -0.3),
        Mood::Vintage => Adjustment::new(-0.2, 0.2, 0.4),
        Mood::Artistic => Adjustment::new(0.1, 0.1, 0.2),
        Mood::Dark => Adjustment::new(-0.2, -0.4, 0.2),
        Mood::Playful => Adjustment::new(0.5, 0.4, -0.2),
        Mood::Nature => Adjustment::new(-0.1, 0.3, 0.5),
        Mood::Performance => Adjustment::new(0.6, 0.4, -0.3),
    }
}

/// Fuse the three signals into a music profile.
///
/// The colour profile is the baseline. The dominant mood's adjustment is
/// added (labels without keyword hits count as energetic); every value is then clamped to
/// `0.0..=1.0` and rounded to two decimals. Genres keep their ranked order,
/// gain one fallback when fewer than three matched, and are capped at
/// [`MAX_GENRE_SEEDS`].
#[must_use]
pub fn fuse(genres: &[SimilarityResult], color: &ColorProfile, mood: &MoodProfile) -> MusicProfile {
    let adjustment = adjustment_for(mood.dominant_mood);

    MusicProfile {
        energy: settle(color.energy + adjustment.energy),
        valence: settle(color.valence + adjustment.valence),
        acousticness: settle(color.acousticness + adjustment.acousticness),
        genre_seeds: genre_seeds(genres),
    }
}

fn genre_seeds(genres: &[SimilarityResult]) -> Vec<String> {
    let mut seeds: Vec<String> = Vec::with_capacity(MAX_GENRE_SEEDS);
    for result in genres {
        if !seeds.contains(&result.genre) {
            seeds.push(result.genre.clone());
        }
    }

    if seeds.len() < MIN_MATCHED_GENRES {
        if let Some(fallback) = FALLBACK_GENRES
            .iter()
            .find(|g| !seeds.iter().any(|s| s == *g))
        {
            log::debug!(
                "Only {} genre(s) matched, adding fallback '{}'",
                seeds.len(),
                fallback
            );
            seeds.push((*fallback).to_string());
        }
    }

    seeds.truncate(MAX_GENRE_SEEDS);
    seeds
}

fn settle(value: f64) -> f64 {
    (value.clamp(0.0, 1.0) * 100.0).round() / 100.0
}
