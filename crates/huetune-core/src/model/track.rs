use serde::{Deserialize, Serialize};

/// A catalog track candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track ID (unique within a playlist).
    pub id: String,
    pub name: String,
    /// Comma-joined artist names.
    pub artist: String,
    /// Short audio sample, when the catalog offers one.
    pub preview_url: Option<String>,
    pub external_url: String,
    pub explicit: bool,
    /// Catalog popularity score, `0..=100`.
    pub popularity: u8,
    pub album_art: Option<String>,
    pub album_name: String,
}

impl Track {
    /// Whether the track carries a playable (non-empty) preview URL.
    #[must_use]
    pub fn has_preview(&self) -> bool {
        self.preview_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Project the track into the response shape consumed by clients.
    #[must_use]
    pub fn to_view(&self) -> TrackView {
        TrackView {
            name: self.name.clone(),
            artist: self.artist.clone(),
            preview_url: self.preview_url.clone(),
            external_url: self.external_url.clone(),
            explicit: self.explicit,
            album_art: self.album_art.clone(),
            album_name: self.album_name.clone(),
        }
    }
}

/// The client-facing view of a playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackView {
    pub name: String,
    pub artist: String,
    pub preview_url: Option<String>,
    pub external_url: String,
    pub explicit: bool,
    pub album_art: Option<String>,
    pub album_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(preview_url: Option<&str>) -> Track {
        Track {
            id: "t1".to_string(),
            name: "Surfin'".to_string(),
            artist: "The Waves, The Tides".to_string(),
            preview_url: preview_url.map(str::to_string),
            external_url: "https://open.spotify.com/track/t1".to_string(),
            explicit: false,
            popularity: 55,
            album_art: Some("https://i.scdn.co/image/abc".to_string()),
            album_name: "Shoreline".to_string(),
        }
    }

    #[test]
    fn test_has_preview() {
        assert!(track(Some("https://p.scdn.co/mp3-preview/1")).has_preview());
        assert!(!track(None).has_preview());
        assert!(!track(Some("")).has_preview());
    }

    #[test]
    fn test_to_view_keeps_client_fields() {
        let view = track(None).to_view();
        assert_eq!(view.name, "Surfin'");
        assert_eq!(view.artist, "The Waves, The Tides");
        assert_eq!(view.album_name, "Shoreline");
        assert!(view.preview_url.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("external_url").is_some());
        assert!(json.get("album_art").is_some());
        assert!(json.get("id").is_none());
        assert!(json.get("popularity").is_none());
    }
}
