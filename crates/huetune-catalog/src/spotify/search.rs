//! Track search against the Spotify Web API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backon::ExponentialBuilder;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use huetune_core::model::Track;

use crate::error::{CatalogError, CatalogResult};
use crate::resilience::{default_backoff, with_retry, RateLimiter};
use crate::source::{clamp_limit, CatalogSearch};
use crate::spotify::auth::TokenProvider;
use crate::spotify::{SOURCE_NAME, USER_AGENT};

const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

const UNKNOWN_ALBUM: &str = "Unknown Album";

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    // Spotify occasionally returns `null` entries in search pages
    #[serde(default)]
    items: Vec<Option<ApiTrack>>,
}

#[derive(Debug, Deserialize)]
struct ApiTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<ApiArtist>,
    #[serde(default)]
    popularity: Option<u32>,
    #[serde(default)]
    explicit: bool,
    #[serde(default)]
    preview_url: Option<String>,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[serde(default)]
    album: Option<ApiAlbum>,
}

#[derive(Debug, Deserialize)]
struct ApiArtist {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalUrls {
    #[serde(default)]
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiAlbum {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    images: Vec<ApiImage>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    url: String,
}

impl From<ApiTrack> for Track {
    fn from(api: ApiTrack) -> Self {
        let artist = api
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let (album_name, album_art) = match api.album {
            Some(album) => (
                album
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
                album.images.into_iter().next().map(|image| image.url),
            ),
            None => (UNKNOWN_ALBUM.to_string(), None),
        };

        Self {
            id: api.id,
            name: api.name,
            artist,
            preview_url: api.preview_url.filter(|url| !url.is_empty()),
            external_url: api.external_urls.spotify.unwrap_or_default(),
            explicit: api.explicit,
            popularity: api.popularity.unwrap_or(0).min(100) as u8,
            album_art,
            album_name,
        }
    }
}

fn parse_tracks(body: SearchResponse) -> Vec<Track> {
    body.tracks
        .map(|page| page.items.into_iter().flatten().map(Track::from).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Spotify track search.
///
/// Wraps an HTTP client, a token provider, and a rate limiter. Transient
/// failures (5xx, 429, timeouts) are retried with exponential backoff.
#[derive(Clone)]
pub struct SpotifyCatalog {
    http: Client,
    auth: Arc<dyn TokenProvider>,
    api_base: String,
    market: String,
    rate_limiter: RateLimiter,
    backoff: ExponentialBuilder,
}

impl std::fmt::Debug for SpotifyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyCatalog")
            .field("api_base", &self.api_base)
            .field("market", &self.market)
            .finish_non_exhaustive()
    }
}

impl SpotifyCatalog {
    /// Create a client searching `market` with tokens from `auth`.
    pub fn new(auth: Arc<dyn TokenProvider>, market: impl Into<String>) -> CatalogResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self {
            http,
            auth,
            api_base: SPOTIFY_API_BASE.to_string(),
            market: market.into(),
            rate_limiter: RateLimiter::new(10),
            backoff: default_backoff(),
        })
    }

    /// Point the client at a different API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    async fn fetch(&self, query: &str, limit: u32) -> CatalogResult<Vec<Track>> {
        self.rate_limiter.acquire().await;
        let token = self.auth.access_token().await?;
        let limit = limit.to_string();

        let response = self
            .http
            .get(format!("{}/search", self.api_base))
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", self.market.as_str()),
            ])
            .send()
            .await?;

        let response = check_status(response)?;

        let body: SearchResponse = response.json().await.map_err(|e| CatalogError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        Ok(parse_tracks(body))
    }
}

fn check_status(response: reqwest::Response) -> CatalogResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let source_name = SOURCE_NAME.to_string();
    Err(match status {
        StatusCode::UNAUTHORIZED => CatalogError::Unauthorized { source_name },
        StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimited { source_name },
        s if s.is_client_error() => CatalogError::Rejected {
            source_name,
            status: s.as_u16(),
        },
        s => CatalogError::Http {
            source_name,
            message: s.to_string(),
        },
    })
}

#[async_trait]
impl CatalogSearch for SpotifyCatalog {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> CatalogResult<Vec<Track>> {
        let limit = clamp_limit(limit);
        with_retry(self.backoff.clone(), query, move || self.fetch(query, limit)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::StaticToken;

    const SEARCH_JSON: &str = r#"{
        "tracks": {
            "href": "https://api.spotify.com/v1/search?query=genre%3Asurf&type=track",
            "items": [
                {
                    "id": "4uLU6hMCjMI75M1A2tKUQC",
                    "name": "Wipe Out",
                    "artists": [{"name": "The Surfaris"}, {"name": "Guest"}],
                    "popularity": 61,
                    "explicit": false,
                    "preview_url": "https://p.scdn.co/mp3-preview/abc",
                    "external_urls": {"spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"},
                    "album": {
                        "name": "Wipe Out",
                        "images": [
                            {"url": "https://i.scdn.co/image/large", "height": 640, "width": 640},
                            {"url": "https://i.scdn.co/image/small", "height": 64, "width": 64}
                        ]
                    }
                },
                null,
                {
                    "id": "bare",
                    "name": "Untitled",
                    "artists": [],
                    "external_urls": {},
                    "preview_url": null
                }
            ],
            "limit": 3,
            "total": 2
        }
    }"#;

    #[test]
    fn test_parse_search_response() {
        let body: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        let tracks = parse_tracks(body);
        assert_eq!(tracks.len(), 2);

        let first = &tracks[0];
        assert_eq!(first.id, "4uLU6hMCjMI75M1A2tKUQC");
        assert_eq!(first.artist, "The Surfaris, Guest");
        assert_eq!(first.popularity, 61);
        assert!(first.has_preview());
        assert_eq!(first.album_art.as_deref(), Some("https://i.scdn.co/image/large"));
        assert_eq!(first.album_name, "Wipe Out");
        assert_eq!(
            first.external_url,
            "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"
        );
    }

    #[test]
    fn test_parse_track_defaults() {
        let body: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        let bare = &parse_tracks(body)[1];
        assert_eq!(bare.popularity, 0);
        assert_eq!(bare.album_name, "Unknown Album");
        assert!(bare.album_art.is_none());
        assert!(!bare.explicit);
        assert!(!bare.has_preview());
        assert_eq!(bare.external_url, "");
    }

    #[test]
    fn test_parse_response_without_tracks() {
        let body: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parse_tracks(body).is_empty());
    }

    #[test]
    fn test_with_api_base_trims_slash() {
        let catalog = SpotifyCatalog::new(Arc::new(StaticToken("t".to_string())), "US")
            .unwrap()
            .with_api_base("http://localhost:8080/v1/");
        assert_eq!(catalog.api_base, "http://localhost:8080/v1");
        assert_eq!(catalog.market(), "US");
        assert_eq!(catalog.name(), "Spotify");
    }
}
