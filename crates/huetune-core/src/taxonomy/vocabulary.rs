/// Genre descriptors, grouped by theme. Order is significant: it breaks
/// similarity ties. Labels are unique.
pub const GENRE_VOCABULARY: &[&str] = &[
    // coastal
    "beach music", "coastal vibes", "ocean sounds", "seaside music", "tropical house",
    "island music", "surf rock", "beach pop", "coastal folk", "ocean ambient",
    "seaside acoustic",
    // nature and outdoors
    "nature sounds", "forest music", "mountain ambient", "outdoor acoustic",
    "wilderness folk", "campfire songs", "hiking music", "nature meditation", "outdoor chill",
    // urban
    "city pop", "urban electronic", "metropolitan house", "street music", "city nightlife",
    "urban hip-hop", "city jazz", "metropolitan ambient", "street art music",
    // relaxing
    "chill music", "relaxing ambient", "calm acoustic", "peaceful music", "meditation sounds",
    "zen music", "spa music", "chillout", "downtempo", "lounge music",
    // energetic
    "dance music", "energetic pop", "party music", "club music", "festival music",
    "dance electronic", "party house", "energetic rock", "celebration music",
    // emotional
    "sad music", "melancholic", "happy music", "uplifting", "romantic music",
    "nostalgic", "dreamy music", "emotional", "moody", "atmospheric",
    // time of day
    "morning music", "sunrise songs", "sunset music", "night music", "midnight vibes",
    "dawn music", "dusk songs", "late night", "early morning",
    // weather and season
    "rainy day music", "sunny music", "storm music", "winter music", "summer vibes",
    "spring music", "autumn songs", "snow music", "wind sounds",
    // instruments
    "acoustic guitar", "electric guitar", "piano music", "violin music", "orchestral",
    "jazz piano", "blues guitar", "rock guitar", "electronic synthesizer",
    "classical orchestra", "folk guitar", "country guitar", "funk bass",
    "reggae rhythm", "latin percussion", "gospel choir", "soul vocals",
    // atmosphere
    "mysterious music", "dark ambient", "bright pop", "warm music", "cool jazz",
    "hot dance", "cold ambient", "soft music", "loud rock", "quiet acoustic",
    "fast electronic", "slow ballad", "medium tempo", "upbeat", "downbeat",
    // cultural
    "latin music", "african rhythms", "european classical", "american folk",
    "asian music", "caribbean", "mediterranean", "scandinavian", "celtic",
    // activity
    "workout music", "study music", "driving music", "cooking music", "reading music",
    "sleep music", "focus music", "concentration", "background music",
    // canonical genre names
    "acoustic", "pop", "rock", "jazz", "classical", "dance", "hip-hop", "metal",
    "blues", "reggae", "country", "funk", "soul", "edm", "indie", "alternative",
    "electronic", "folk", "gospel", "latin", "new-age", "r-n-b", "rap", "reggaeton",
    "salsa", "samba", "tango", "techno", "trance", "trip-hop", "world-music",
    "ambient", "chill", "lofi", "house", "disco", "punk", "grunge", "emo",
    "hardcore", "progressive", "psychedelic", "garage", "surf", "shoegaze",
    "post-rock", "math-rock", "indie-pop", "indie-rock", "dream-pop", "synth-pop",
    "new-wave", "post-punk", "goth", "industrial", "experimental", "dubstep",
    "drum-and-bass", "jungle", "breakbeat", "bossa-nova", "flamenco",
    "bluegrass", "rhythm-and-blues", "motown", "deep-house", "tech-house",
    "progressive-house", "electro-house", "tropical-house", "melodic-house",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vocabulary_labels_unique() {
        let unique: HashSet<&str> = GENRE_VOCABULARY.iter().copied().collect();
        assert_eq!(unique.len(), GENRE_VOCABULARY.len());
    }

    #[test]
    fn test_vocabulary_labels_normalised() {
        for label in GENRE_VOCABULARY {
            assert!(!label.is_empty());
            assert_eq!(label.trim(), *label);
            assert_eq!(label.to_lowercase(), *label);
        }
    }

    #[test]
    fn test_vocabulary_contains_coastal_and_canonical() {
        assert!(GENRE_VOCABULARY.contains(&"surf rock"));
        assert!(GENRE_VOCABULARY.contains(&"chill"));
        assert!(GENRE_VOCABULARY.len() > 150);
    }
}
