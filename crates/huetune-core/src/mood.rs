//! Label mood scoring.
//!
//! Each [`Mood`] carries a keyword set and a weight. Labels are matched
//! against keywords by case-insensitive substring, every hit adds the
//! category weight, and the category with the highest normalised score
//! becomes the dominant mood.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A mood category, in declaration (tie-break) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Energetic,
    Calm,
    Urban,
    Vintage,
    Artistic,
    Dark,
    Playful,
    Nature,
    Performance,
}

impl Mood {
    /// Every category, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Energetic,
        Self::Calm,
        Self::Urban,
        Self::Vintage,
        Self::Artistic,
        Self::Dark,
        Self::Playful,
        Self::Nature,
        Self::Performance,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energetic => "energetic",
            Self::Calm => "calm",
            Self::Urban => "urban",
            Self::Vintage => "vintage",
            Self::Artistic => "artistic",
            Self::Dark => "dark",
            Self::Playful => "playful",
            Self::Nature => "nature",
            Self::Performance => "performance",
        }
    }

    /// Lower-case keywords that signal this mood.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Energetic => &[
                "party",
                "dance",
                "celebration",
                "festival",
                "nightlife",
                "club",
                "concert",
                "performance",
                "stage",
                "microphone",
                "bubble",
                "whistle",
            ],
            Self::Calm => &[
                "beach",
                "ocean",
                "sea",
                "sunset",
                "sunrise",
                "forest",
                "mountain",
                "nature",
                "peaceful",
                "serene",
                "lakeside",
                "lakeshore",
                "valley",
            ],
            Self::Urban => &[
                "city",
                "street",
                "building",
                "urban",
                "metropolitan",
                "downtown",
                "skyline",
                "car",
                "road",
                "highway",
            ],
            Self::Vintage => &[
                "vintage",
                "retro",
                "old",
                "classic",
                "antique",
                "nostalgic",
                "traditional",
                "castle",
                "boathouse",
            ],
            Self::Artistic => &[
                "art",
                "painting",
                "gallery",
                "museum",
                "creative",
                "abstract",
                "artistic",
                "unicycle",
                "quirky",
            ],
            Self::Dark => &[
                "dark",
                "night",
                "shadow",
                "black",
                "gothic",
                "mysterious",
                "ominous",
            ],
            Self::Playful => &[
                "bubble", "whistle", "unicycle", "fun", "playful", "quirky", "circus",
            ],
            Self::Nature => &[
                "sheep",
                "coyote",
                "wildlife",
                "forest",
                "mountain",
                "valley",
                "nature",
                "outdoor",
                "wilderness",
            ],
            Self::Performance => &[
                "stage",
                "microphone",
                "concert",
                "performance",
                "live",
                "show",
                "entertainment",
            ],
        }
    }

    /// How strongly a matched keyword counts for this mood.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Energetic | Self::Performance => 1.0,
            Self::Urban | Self::Playful => 0.9,
            Self::Calm | Self::Nature => 0.8,
            Self::Vintage => 0.7,
            Self::Artistic => 0.6,
            Self::Dark => 0.5,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category scoring breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodScore {
    pub mood: Mood,
    pub score: f64,
    pub match_count: u32,
    /// `score / match_count`, or `0.0` with no matches.
    pub normalized_score: f64,
}

/// Result of scoring a label set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodProfile {
    /// Category with the highest normalised score. With no keyword hits
    /// every score is zero and the first declared category wins.
    pub dominant_mood: Mood,
    /// One entry per category, in declaration order.
    pub scores: Vec<MoodScore>,
    /// Normalised score of the dominant mood (`0.0` without one).
    pub confidence: f64,
}

impl MoodProfile {
    /// Look up the breakdown for one category.
    #[must_use]
    pub fn score_for(&self, mood: Mood) -> Option<&MoodScore> {
        self.scores.iter().find(|s| s.mood == mood)
    }
}

/// Score a label set against every mood category.
#[must_use]
pub fn score_labels<S: AsRef<str>>(labels: &[S]) -> MoodProfile {
    let lowered: Vec<String> = labels
        .iter()
        .map(|label| label.as_ref().to_lowercase())
        .collect();

    let scores: Vec<MoodScore> = Mood::ALL
        .iter()
        .map(|&mood| {
            let match_count: u32 = lowered
                .iter()
                .map(|label| {
                    mood.keywords()
                        .iter()
                        .filter(|keyword| label.contains(*keyword))
                        .count() as u32
                })
                .sum();
            let score = f64::from(match_count) * mood.weight();
            let normalized_score = if match_count == 0 {
                0.0
            } else {
                score / f64::from(match_count)
            };
            MoodScore {
                mood,
                score,
                match_count,
                normalized_score,
            }
        })
        .collect();

    // Strictly-greater comparison keeps the earliest category on ties,
    // including the all-zero case.
    let dominant = scores
        .iter()
        .skip(1)
        .fold(scores[0], |best, candidate| {
            if candidate.normalized_score > best.normalized_score {
                *candidate
            } else {
                best
            }
        });

    MoodProfile {
        dominant_mood: dominant.mood,
        confidence: dominant.normalized_score,
        scores,
    }
}
