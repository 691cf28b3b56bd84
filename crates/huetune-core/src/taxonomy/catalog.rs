/// Genre used when no seed survives validation.
pub const DEFAULT_CATALOG_GENRE: &str = "pop";

/// Genre tokens accepted by the track catalog's `genre:` filter.
pub const CATALOG_GENRES: &[&str] = &[
    "acoustic", "pop", "rock", "jazz", "classical", "dance", "hip-hop", "metal", "blues",
    "reggae", "country", "funk", "soul", "edm", "indie", "alternative", "electronic", "folk",
    "gospel", "latin", "new-age", "r-n-b", "rap", "reggaeton", "salsa", "samba", "tango",
    "techno", "trance", "trip-hop", "world-music", "ambient", "chill", "lofi", "house",
    "disco", "punk", "grunge", "emo", "screamo", "hardcore", "death-metal", "black-metal",
    "progressive", "psychedelic", "garage", "surf", "shoegaze", "post-rock", "math-rock",
    "indie-pop", "indie-rock", "dream-pop", "synth-pop", "new-wave", "post-punk", "goth",
    "industrial", "noise", "experimental", "avant-garde", "minimal", "maximal", "glitch",
    "dubstep", "drum-and-bass", "jungle", "breakbeat", "big-beat", "downtempo", "chillout",
    "lounge", "smooth-jazz", "bossa-nova", "flamenco", "celtic", "irish", "scottish",
    "bluegrass", "honky-tonk", "western", "outlaw-country", "alt-country", "country-rock",
    "southern-rock", "swamp-rock", "delta-blues", "chicago-blues", "texas-blues",
    "rhythm-and-blues", "motown", "philly-soul", "memphis-soul", "northern-soul",
    "deep-house", "tech-house", "progressive-house", "electro-house", "future-house",
    "bass-house", "tropical-house", "melodic-house", "afro-house", "g-house", "jackin-house",
    "vocal-house", "french-house", "italo-disco", "euro-disco", "space-disco", "cosmic-disco",
    "nu-disco", "disco-house", "boogie", "funk-disco", "philly-disco", "new-york-disco",
    "miami-disco", "chicago-disco",
];

/// Whether `genre` is an accepted catalog token (ASCII case-insensitive).
#[must_use]
pub fn is_catalog_genre(genre: &str) -> bool {
    CATALOG_GENRES.iter().any(|g| g.eq_ignore_ascii_case(genre))
}

/// Descriptive keyword pair that sharpens a genre query, if one is known.
///
/// Keys are the scene phrases produced for contextual matching plus the
/// catalog tokens those scenes usually resolve to.
#[must_use]
pub fn mood_keywords(genre: &str) -> Option<&'static str> {
    let keywords = match genre.to_lowercase().as_str() {
        // coastal
        "surf rock" => "summer beach",
        "beach pop" => "summer coastal",
        "beach music" => "summer ocean",
        "california sound" => "summer west coast",
        "coastal rock" => "ocean waves",
        "ocean ambient" | "lake music" => "peaceful water",
        "sea shanties" => "maritime folk",
        "maritime folk" => "ocean sailing",
        "coastal indie" => "beach acoustic",
        "wave music" => "ocean surf",
        // nature
        "folk music" => "acoustic nature",
        "indie folk" => "acoustic indie",
        "nature sounds" => "outdoor ambient",
        "mountain music" => "outdoor folk",
        "outdoor ambient" => "nature peaceful",
        "peaceful acoustic" | "peaceful music" => "calm serene",
        "water ambient" => "peaceful ocean",
        "serene folk" => "calm acoustic",
        // urban
        "urban pop" => "city metropolitan",
        "city hip hop" => "urban street",
        "metropolitan electronic" => "city nightlife",
        "street music" => "urban underground",
        "urban indie" => "city alternative",
        "city ambient" => "urban atmospheric",
        "urban electronic" => "city electronic",
        "metropolitan pop" => "city mainstream",
        // performance and party
        "live music" => "concert performance",
        "concert rock" => "live energy",
        "performance pop" => "stage show",
        "stage energy" => "live performance",
        "live performance" => "concert stage",
        "party music" => "celebration dance",
        "celebration pop" => "party fun",
        "festival electronic" => "party dance",
        "dance music" => "party electronic",
        "party house" => "dance electronic",
        // playful
        "playful pop" => "fun cheerful",
        "bubblegum pop" => "fun playful",
        "fun music" => "playful cheerful",
        "cheerful electronic" => "happy dance",
        "quirky indie" => "playful alternative",
        "playful music" => "fun quirky",
        "circus music" => "playful fun",
        "funky pop" => "quirky dance",
        // travel
        "road trip music" => "driving travel",
        "driving rock" => "highway road",
        "highway pop" => "road trip",
        "travel music" => "journey adventure",
        "road songs" => "driving highway",
        // rural and historic
        "nature ambient" => "outdoor peaceful",
        "wildlife sounds" => "nature outdoor",
        "pastoral music" => "rural peaceful",
        "country folk" => "rural acoustic",
        "rural acoustic" => "country folk",
        "medieval music" => "historical traditional",
        "castle ambient" => "medieval atmospheric",
        "historical folk" => "traditional medieval",
        "architectural music" => "historical ambient",
        "vintage sounds" => "retro traditional",
        // time of day
        "golden hour music" => "sunset warm",
        "sunset pop" => "evening warm",
        "dawn ambient" => "morning peaceful",
        "warm acoustic" => "sunset golden",
        "nocturnal music" => "night dark",
        "night ambient" => "nocturnal atmospheric",
        "dark pop" => "night mysterious",
        "moonlight music" => "night romantic",
        "evening vibes" => "sunset night",
        // catalog tokens
        "surf" => "summer beach",
        "chill" | "chillout" => "calm relaxing",
        "ambient" => "peaceful atmospheric",
        "lofi" => "mellow study",
        "folk" => "acoustic nature",
        "acoustic" => "calm serene",
        "house" | "tropical-house" => "summer dance",
        "dance" => "party electronic",
        "downtempo" => "mellow evening",
        _ => return None,
    };
    Some(keywords)
}
