//! Contextual query phrases.
//!
//! Raw vision labels ("seashore", "unicycle") rarely sit close to a genre
//! descriptor in embedding space on their own. This module expands a signal
//! into a list of musical phrases: the labels themselves, a colour
//! description, and a fixed set of phrases for every scene theme a label
//! triggers.

use crate::color;
use crate::model::ImageSignal;

/// A scene recognised from label substrings, with the musical phrases it
/// contributes.
#[derive(Debug, Clone, Copy)]
pub struct SceneTheme {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub phrases: &'static [&'static str],
}

impl SceneTheme {
    /// Whether a lower-cased label triggers this theme.
    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        self.triggers.iter().any(|t| label.contains(t))
    }
}

pub const SCENE_THEMES: &[SceneTheme] = &[
    SceneTheme {
        name: "beach",
        triggers: &["beach", "sandbar", "seashore"],
        phrases: &[
            "surf rock",
            "beach pop",
            "california sound",
            "coastal rock",
            "summer vibes",
            "ocean waves",
        ],
    },
    SceneTheme {
        name: "ocean",
        triggers: &["ocean", "sea", "coast"],
        phrases: &[
            "ocean ambient",
            "sea shanties",
            "maritime folk",
            "coastal indie",
            "wave music",
        ],
    },
    SceneTheme {
        name: "wilderness",
        triggers: &["forest", "mountain", "valley"],
        phrases: &[
            "folk music",
            "indie folk",
            "acoustic",
            "nature sounds",
            "mountain music",
            "outdoor ambient",
        ],
    },
    SceneTheme {
        name: "lake",
        triggers: &["lakeside", "lakeshore"],
        phrases: &[
            "lake music",
            "peaceful acoustic",
            "water ambient",
            "serene folk",
        ],
    },
    SceneTheme {
        name: "city",
        triggers: &["city", "urban", "street"],
        phrases: &[
            "urban pop",
            "city hip hop",
            "metropolitan electronic",
            "street music",
            "urban indie",
        ],
    },
    SceneTheme {
        name: "skyline",
        triggers: &["building", "skyline"],
        phrases: &[
            "city ambient",
            "urban electronic",
            "metropolitan pop",
            "architectural music",
        ],
    },
    SceneTheme {
        name: "stage",
        triggers: &["stage", "microphone", "concert"],
        phrases: &[
            "live music",
            "concert rock",
            "performance pop",
            "stage energy",
            "live performance",
        ],
    },
    SceneTheme {
        name: "party",
        triggers: &["party", "celebration", "festival"],
        phrases: &[
            "party music",
            "celebration pop",
            "festival electronic",
            "dance music",
            "party house",
        ],
    },
    SceneTheme {
        name: "playful",
        triggers: &["bubble", "whistle"],
        phrases: &[
            "playful pop",
            "bubblegum pop",
            "fun music",
            "cheerful electronic",
        ],
    },
    SceneTheme {
        name: "road",
        triggers: &["car", "road", "highway"],
        phrases: &[
            "road trip music",
            "driving rock",
            "highway pop",
            "travel music",
            "road songs",
        ],
    },
    SceneTheme {
        name: "quirky",
        triggers: &["unicycle", "bicycle"],
        phrases: &["quirky indie", "playful music", "circus music", "funky pop"],
    },
    SceneTheme {
        name: "wildlife",
        triggers: &["sheep", "coyote", "wildlife"],
        phrases: &[
            "nature ambient",
            "wildlife sounds",
            "pastoral music",
            "country folk",
            "rural acoustic",
        ],
    },
    SceneTheme {
        name: "historic",
        triggers: &["castle", "boathouse"],
        phrases: &[
            "medieval music",
            "castle ambient",
            "historical folk",
            "architectural music",
            "vintage sounds",
        ],
    },
    SceneTheme {
        name: "golden hour",
        triggers: &["sunset", "sunrise", "dawn"],
        phrases: &[
            "golden hour music",
            "sunset pop",
            "dawn ambient",
            "warm acoustic",
            "peaceful music",
        ],
    },
    SceneTheme {
        name: "night",
        triggers: &["night", "dark", "moon"],
        phrases: &[
            "nocturnal music",
            "night ambient",
            "dark pop",
            "moonlight music",
            "evening vibes",
        ],
    },
];

/// Build the query phrases for a signal.
///
/// Order: every label, the colour description, then per label the phrases
/// of each theme it triggers. A label that triggers no theme contributes
/// `"<label> music"`, `"<label> vibes"`, and `"<label> atmosphere"`.
#[must_use]
pub fn contextual_phrases(signal: &ImageSignal) -> Vec<String> {
    let mut phrases: Vec<String> = signal.labels.clone();
    phrases.push(color::describe(signal.color));

    for label in &signal.labels {
        let lowered = label.to_lowercase();
        let mut triggered = false;

        for theme in SCENE_THEMES.iter().filter(|t| t.matches(&lowered)) {
            triggered = true;
            phrases.extend(theme.phrases.iter().map(|p| (*p).to_string()));
        }

        if !triggered {
            phrases.extend([
                format!("{label} music"),
                format!("{label} vibes"),
                format!("{label} atmosphere"),
            ]);
        }
    }

    phrases
}
