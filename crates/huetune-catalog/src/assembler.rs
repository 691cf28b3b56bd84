//! Playlist assembly.
//!
//! A [`MusicProfile`] becomes a track list in two phases. The cascade
//! issues catalog queries per validated genre (recency, mood keywords, a
//! year sweep) and, if the pool is still short, genre-less fallback
//! queries. [`select_tracks`] then deduplicates the pool and applies the
//! popularity, explicit-content, and preview rules with progressively
//! relaxed thresholds.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::Datelike;

use huetune_core::model::{MusicProfile, PlaylistOptions, Track};
use huetune_core::taxonomy::{is_catalog_genre, mood_keywords, DEFAULT_CATALOG_GENRE};

use crate::error::{CatalogError, CatalogResult};
use crate::source::{clamp_limit, CatalogSearch};

/// Genres searched per profile.
const MAX_GENRES: usize = 4;

/// Popularity a track needs on the first pass.
const POPULARITY_FLOOR: u8 = 40;

/// Relaxed floors for clean playlists that came up short.
const CLEAN_RELAXED_FLOORS: [u8; 2] = [25, 15];

/// Floors for the final backfill from the whole pool.
const BACKFILL_FLOORS: [u8; 2] = [25, 0];

const YEAR_SWEEP_LIMIT: u32 = 5;
const FALLBACK_LIMIT: u32 = 20;

/// An inclusive release-year range, rendered as `start-end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The year ranges used by each cascade strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRanges {
    pub recent: YearRange,
    pub sweep: [YearRange; 3],
    pub fallback: [YearRange; 3],
}

impl YearRanges {
    /// Ranges anchored on `year`: recent `Y-4..Y`, sweep `Y-2..Y`,
    /// `Y-4..Y-2`, `Y-6..Y-4`, fallback `Y-1..Y`, `Y-2..Y`, `Y-3..Y`.
    pub const fn anchored(year: i32) -> Self {
        Self {
            recent: YearRange::new(year - 4, year),
            sweep: [
                YearRange::new(year - 2, year),
                YearRange::new(year - 4, year - 2),
                YearRange::new(year - 6, year - 4),
            ],
            fallback: [
                YearRange::new(year - 1, year),
                YearRange::new(year - 2, year),
                YearRange::new(year - 3, year),
            ],
        }
    }

    /// Ranges anchored on the current local year.
    pub fn current() -> Self {
        Self::anchored(chrono::Local::now().year())
    }
}

/// Keep the whitelisted genres (lower-cased, deduplicated, at most four);
/// fall back to the default genre when none survive.
pub fn validate_genres(seeds: &[String]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for seed in seeds {
        let genre = seed.trim().to_lowercase();
        if is_catalog_genre(&genre) && !genres.contains(&genre) {
            genres.push(genre);
        }
    }
    genres.truncate(MAX_GENRES);

    if genres.is_empty() {
        genres.push(DEFAULT_CATALOG_GENRE.to_string());
    }
    genres
}

/// Tally of catalog queries issued during one assembly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct QueryStats {
    attempted: usize,
    succeeded: usize,
}

/// Drives the query cascade against a catalog.
pub struct PlaylistAssembler {
    catalog: Arc<dyn CatalogSearch>,
    years: YearRanges,
}

impl fmt::Debug for PlaylistAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaylistAssembler")
            .field("catalog", &self.catalog.name())
            .field("years", &self.years)
            .finish()
    }
}

impl PlaylistAssembler {
    /// An assembler using year ranges anchored on the current year.
    pub fn new(catalog: Arc<dyn CatalogSearch>) -> Self {
        Self::with_year_ranges(catalog, YearRanges::current())
    }

    pub fn with_year_ranges(catalog: Arc<dyn CatalogSearch>, years: YearRanges) -> Self {
        Self { catalog, years }
    }

    /// Assemble a playlist for `profile`.
    ///
    /// Returns at most `options.playlist_size()` tracks, possibly fewer
    /// when the catalog runs dry. Fails with
    /// [`CatalogError::AllQueriesFailed`] only when no query succeeded.
    pub async fn assemble(
        &self,
        profile: &MusicProfile,
        options: &PlaylistOptions,
    ) -> CatalogResult<Vec<Track>> {
        let size = options.playlist_size();
        let genres = validate_genres(&profile.genre_seeds);
        log::info!(
            "Assembling {} tracks ({}) from genres [{}]",
            size,
            options.explicit_filter,
            genres.join(", ")
        );

        let mut pool: Vec<Track> = Vec::new();
        let mut stats = QueryStats::default();

        for genre in &genres {
            self.search_genre(genre, size, &mut pool, &mut stats).await;
        }

        if pool.len() < size {
            log::debug!(
                "Pool has {} of {} tracks, broadening search",
                pool.len(),
                size
            );
            for range in self.years.fallback {
                if saturated(pool.len(), size) {
                    break;
                }
                let query = format!("year:{range}");
                let result = self.run_query(&query, FALLBACK_LIMIT).await;
                collect(result, &mut pool, &mut stats);
            }
        }

        if stats.succeeded == 0 {
            return Err(CatalogError::AllQueriesFailed {
                attempted: stats.attempted,
            });
        }

        log::info!(
            "Catalog cascade: {} tracks pooled from {}/{} queries",
            pool.len(),
            stats.succeeded,
            stats.attempted
        );

        let tracks = select_tracks(pool, options);
        if tracks.len() < size {
            log::warn!(
                "Only found {} of {} requested tracks, returning all available",
                tracks.len(),
                size
            );
        }
        Ok(tracks)
    }

    async fn search_genre(
        &self,
        genre: &str,
        size: usize,
        pool: &mut Vec<Track>,
        stats: &mut QueryStats,
    ) {
        let recent_query = format!("genre:{genre} year:{}", self.years.recent);
        let mood_query = match mood_keywords(genre) {
            Some(keywords) => format!("genre:{genre} {keywords}"),
            None => format!("genre:{genre}"),
        };

        let (recent, mood) = tokio::join!(
            self.run_query(&recent_query, share_of(size, 3)),
            self.run_query(&mood_query, share_of(size, 4)),
        );
        collect(recent, pool, stats);
        collect(mood, pool, stats);

        for range in self.years.sweep {
            if saturated(pool.len(), size) {
                break;
            }
            let query = format!("genre:{genre} year:{range}");
            let result = self.run_query(&query, YEAR_SWEEP_LIMIT).await;
            collect(result, pool, stats);
        }
    }

    async fn run_query(&self, query: &str, limit: u32) -> CatalogResult<Vec<Track>> {
        log::debug!("Catalog query '{}' (limit {})", query, limit);
        let result = self.catalog.search_tracks(query, clamp_limit(limit)).await;
        if let Err(ref e) = result {
            log::warn!(
                "{} search failed for '{}': {}",
                self.catalog.name(),
                query,
                e
            );
        }
        result
    }
}

fn collect(result: CatalogResult<Vec<Track>>, pool: &mut Vec<Track>, stats: &mut QueryStats) {
    stats.attempted += 1;
    if let Ok(tracks) = result {
        stats.succeeded += 1;
        pool.extend(tracks);
    }
}

/// Whether the pool holds at least 1.5 times the requested size.
fn saturated(pool_len: usize, size: usize) -> bool {
    pool_len.saturating_mul(2) >= size.saturating_mul(3)
}

/// `ceil(size / divisor)` as a page size.
fn share_of(size: usize, divisor: usize) -> u32 {
    u32::try_from(size.div_ceil(divisor)).unwrap_or(u32::MAX)
}

/// Turn a raw query pool into the final playlist.
///
/// In order: deduplicate by id (first occurrence wins); keep popularity
/// of at least 40; for clean playlists drop explicit tracks and, while
/// short, re-admit clean tracks at popularity 25 then 15; move tracks with
/// a preview ahead of those without; while still short, backfill from
/// the pool at popularity 25 then without a floor (never explicit tracks
/// when clean); truncate to the requested size.
pub fn select_tracks(pool: Vec<Track>, options: &PlaylistOptions) -> Vec<Track> {
    let size = options.playlist_size();
    let clean = options.explicit_filter.is_clean();

    let mut seen: HashSet<String> = HashSet::new();
    let unique: Vec<Track> = pool
        .into_iter()
        .filter(|track| seen.insert(track.id.clone()))
        .collect();

    let popular_count = unique
        .iter()
        .filter(|t| t.popularity >= POPULARITY_FLOOR)
        .count();
    log::info!(
        "Found {} unique tracks, {} with popularity >= {}",
        unique.len(),
        popular_count,
        POPULARITY_FLOOR
    );

    let mut selected: Vec<&Track> = unique
        .iter()
        .filter(|t| t.popularity >= POPULARITY_FLOOR && !(clean && t.explicit))
        .collect();

    if clean {
        for floor in CLEAN_RELAXED_FLOORS {
            if selected.len() >= size {
                break;
            }
            log::debug!(
                "Only {} clean tracks, relaxing popularity floor to {}",
                selected.len(),
                floor
            );
            admit(&mut selected, &unique, |t| t.popularity >= floor && !t.explicit);
        }
    }
    log::info!(
        "{} tracks after explicit filter ({})",
        selected.len(),
        options.explicit_filter
    );

    let (mut ordered, without_preview): (Vec<&Track>, Vec<&Track>) =
        selected.into_iter().partition(|t| t.has_preview());
    ordered.extend(without_preview);

    for floor in BACKFILL_FLOORS {
        if ordered.len() >= size {
            break;
        }
        log::debug!(
            "Only {} tracks, backfilling from pool at popularity >= {}",
            ordered.len(),
            floor
        );
        admit(&mut ordered, &unique, |t| {
            t.popularity >= floor && !(clean && t.explicit)
        });
    }

    ordered.truncate(size);
    ordered.into_iter().cloned().collect()
}

/// Append every pool track accepted by `keep` that is not yet selected.
fn admit<'a, F>(selected: &mut Vec<&'a Track>, pool: &'a [Track], keep: F)
where
    F: Fn(&Track) -> bool,
{
    let present: HashSet<&'a str> = selected.iter().map(|t| t.id.as_str()).collect();
    let additions: Vec<&'a Track> = pool
        .iter()
        .filter(|t| !present.contains(t.id.as_str()) && keep(t))
        .collect();
    selected.extend(additions);
}
