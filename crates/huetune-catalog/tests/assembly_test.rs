//! Integration tests for the catalog cascade and the full
//! signal → profile → playlist pipeline.
//!
//! The catalog and embedding provider are in-memory fakes, so no network
//! access is needed.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use huetune_catalog::{CatalogError, CatalogResult, CatalogSearch, PlaylistAssembler, YearRanges};
use huetune_core::model::{ExplicitFilter, ImageSignal, MusicProfile, PlaylistOptions, Rgb, Track};
use huetune_search::{EmbeddingProvider, GenreIndex, SearchResult, SmartMapper};

type Responder = dyn Fn(&str, u32) -> CatalogResult<Vec<Track>> + Send + Sync;

/// A catalog that records every query and answers from a closure.
struct ScriptedCatalog {
    queries: Mutex<Vec<(String, u32)>>,
    respond: Box<Responder>,
}

impl ScriptedCatalog {
    fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&str, u32) -> CatalogResult<Vec<Track>> + Send + Sync + 'static,
    {
        Arc::new(Self {
            queries: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    fn queries(&self) -> Vec<(String, u32)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSearch for ScriptedCatalog {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> CatalogResult<Vec<Track>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), limit));
        (self.respond)(query, limit)
    }
}

fn make_track(id: usize, popularity: u8, explicit: bool, preview: bool) -> Track {
    Track {
        id: format!("track-{id}"),
        name: format!("Song {id}"),
        artist: "Band".to_string(),
        preview_url: preview.then(|| format!("https://p.scdn.co/mp3-preview/{id}")),
        external_url: format!("https://open.spotify.com/track/{id}"),
        explicit,
        popularity,
        album_art: None,
        album_name: "Record".to_string(),
    }
}

/// Answers every query with `limit` fresh tracks; every third is explicit
/// and every other one has a preview.
fn generous_catalog() -> Arc<ScriptedCatalog> {
    let next = AtomicUsize::new(0);
    ScriptedCatalog::new(move |_, limit| {
        Ok((0..limit)
            .map(|_| {
                let id = next.fetch_add(1, Ordering::SeqCst);
                make_track(id, 30 + (id % 50) as u8, id % 3 == 0, id % 2 == 0)
            })
            .collect())
    })
}

fn profile(seeds: &[&str]) -> MusicProfile {
    MusicProfile {
        energy: 0.5,
        valence: 0.5,
        acousticness: 0.5,
        genre_seeds: seeds.iter().map(|s| s.to_string()).collect(),
    }
}

fn assembler(catalog: &Arc<ScriptedCatalog>) -> PlaylistAssembler {
    let catalog: Arc<dyn CatalogSearch> = Arc::clone(catalog) as Arc<dyn CatalogSearch>;
    PlaylistAssembler::with_year_ranges(catalog, YearRanges::anchored(2026))
}

#[tokio::test]
async fn test_cascade_issues_every_strategy_when_catalog_is_empty() {
    let catalog = ScriptedCatalog::new(|_, _| Ok(Vec::new()));
    let options = PlaylistOptions::default();

    let tracks = assembler(&catalog)
        .assemble(&profile(&["surf rock", "Chill"]), &options)
        .await
        .unwrap();
    assert!(tracks.is_empty());

    let queries = catalog.queries();
    let first_two: HashSet<(String, u32)> = queries[..2].iter().cloned().collect();
    assert_eq!(
        first_two,
        HashSet::from([
            ("genre:chill year:2022-2026".to_string(), 4),
            ("genre:chill calm relaxing".to_string(), 3),
        ])
    );
    assert_eq!(
        queries[2..].to_vec(),
        vec![
            ("genre:chill year:2024-2026".to_string(), 5),
            ("genre:chill year:2022-2024".to_string(), 5),
            ("genre:chill year:2020-2022".to_string(), 5),
            ("year:2025-2026".to_string(), 20),
            ("year:2024-2026".to_string(), 20),
            ("year:2023-2026".to_string(), 20),
        ]
    );
}

#[tokio::test]
async fn test_invalid_seeds_fall_back_to_pop() {
    let catalog = ScriptedCatalog::new(|_, _| Ok(Vec::new()));
    assembler(&catalog)
        .assemble(&profile(&["beach music"]), &PlaylistOptions::default())
        .await
        .unwrap();

    let queries = catalog.queries();
    assert!(queries.iter().any(|(q, _)| q == "genre:pop year:2022-2026"));
    // no keywords for "pop": the mood query is the bare genre filter
    assert!(queries.iter().any(|(q, _)| q == "genre:pop"));
}

#[tokio::test]
async fn test_saturated_pool_short_circuits_sweep() {
    let catalog = generous_catalog();
    let options = PlaylistOptions::new(4, ExplicitFilter::Clean).unwrap();

    let tracks = assembler(&catalog)
        .assemble(&profile(&["chill"]), &options)
        .await
        .unwrap();

    // recency (2) + mood (1) pool 3 tracks; the first sweep page of 5
    // passes 1.5 x 4, so the rest of the sweep and the fallback are skipped
    let queries = catalog.queries();
    assert_eq!(queries.len(), 3);
    assert!(tracks.len() <= 4);
}

#[tokio::test]
async fn test_playlist_constraints_hold() {
    let catalog = generous_catalog();
    let options = PlaylistOptions::new(10, ExplicitFilter::Clean).unwrap();

    let tracks = assembler(&catalog)
        .assemble(&profile(&["chill", "ambient", "lofi", "surf", "folk"]), &options)
        .await
        .unwrap();

    assert_eq!(tracks.len(), 10);
    assert!(tracks.iter().all(|t| !t.explicit));
    let ids: HashSet<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), tracks.len());

    // previews come first
    let first_without = tracks.iter().position(|t| !t.has_preview());
    if let Some(at) = first_without {
        assert!(tracks[at..].iter().all(|t| !t.has_preview()));
    }

    // at most four genres are searched
    let queries = catalog.queries();
    assert!(!queries.iter().any(|(q, _)| q.starts_with("genre:folk")));
}

#[tokio::test]
async fn test_single_failure_is_skipped() {
    let next = AtomicUsize::new(0);
    let catalog = ScriptedCatalog::new(move |query, limit| {
        if query.contains("year:2022-2026") {
            return Err(CatalogError::Http {
                source_name: "scripted".to_string(),
                message: "503 Service Unavailable".to_string(),
            });
        }
        Ok((0..limit)
            .map(|_| make_track(next.fetch_add(1, Ordering::SeqCst), 70, false, true))
            .collect())
    });

    let tracks = assembler(&catalog)
        .assemble(&profile(&["chill"]), &PlaylistOptions::default())
        .await
        .unwrap();
    assert_eq!(tracks.len(), 10);
}

#[tokio::test]
async fn test_total_failure_is_an_error() {
    let catalog = ScriptedCatalog::new(|_, _| {
        Err(CatalogError::RateLimited {
            source_name: "scripted".to_string(),
        })
    });

    let err = assembler(&catalog)
        .assemble(&profile(&["chill"]), &PlaylistOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::AllQueriesFailed { attempted: 8 }));
    assert!(err.to_string().starts_with("catalog search failed"));
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

const DIMENSIONS: usize = 256;

/// Bag-of-words embedding: each word bumps one hashed dimension.
#[derive(Debug)]
struct BagOfWords;

fn fnv1a(word: &str) -> u64 {
    word.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[async_trait]
impl EmbeddingProvider for BagOfWords {
    fn name(&self) -> &str {
        "bag-of-words"
    }

    async fn embed(&self, text: &str) -> SearchResult<Vec<f32>> {
        let mut vector = vec![0.0_f32; DIMENSIONS];
        for word in text.split_whitespace() {
            let slot = (fnv1a(&word.to_lowercase()) % DIMENSIONS as u64) as usize;
            vector[slot] += 1.0;
        }
        Ok(vector)
    }
}

#[tokio::test]
async fn test_beach_image_to_clean_playlist() {
    let index = Arc::new(GenreIndex::new(Arc::new(BagOfWords)));
    let mapper = SmartMapper::new(index);
    let signal = ImageSignal::new(["beach", "ocean"], Rgb::new(180, 200, 230));

    let outcome = mapper.map(&signal).await.unwrap();
    let profile = &outcome.profile;

    assert!(profile.valence > 0.5);
    assert!(profile.acousticness >= 0.8);
    assert!(!profile.genre_seeds.is_empty() && profile.genre_seeds.len() <= 4);
    assert!(profile
        .genre_seeds
        .iter()
        .any(|g| ["beach", "ocean", "surf", "coast", "sea"]
            .iter()
            .any(|w| g.contains(w))));

    let catalog = generous_catalog();
    let options = PlaylistOptions::new(10, ExplicitFilter::Clean).unwrap();
    let tracks = assembler(&catalog).assemble(profile, &options).await.unwrap();

    assert!(tracks.len() <= 10);
    assert!(tracks.iter().all(|t| !t.explicit));
    let ids: HashSet<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), tracks.len());
}
