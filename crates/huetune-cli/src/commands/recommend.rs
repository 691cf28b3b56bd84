use std::sync::Arc;

use anyhow::{Context, Result};
use huetune_catalog::spotify::{ClientCredentialsAuth, SpotifyCatalog};
use huetune_catalog::{Config, PlaylistAssembler};
use huetune_core::model::{ExplicitFilter, ImageSignal, MusicProfile, PlaylistOptions, Rgb, Track};
use huetune_search::{GenreIndex, OllamaEmbedder, SmartMapper};

/// Arguments of one `recommend` invocation.
#[derive(Debug)]
pub struct Request {
    pub labels: Vec<String>,
    pub color: Rgb,
    pub size: Option<usize>,
    pub explicit: Option<ExplicitFilter>,
    pub json: bool,
}

/// Playlist options from the config, with any CLI flags on top.
pub fn resolve_options(
    config: &Config,
    size: Option<usize>,
    explicit: Option<ExplicitFilter>,
) -> Result<PlaylistOptions> {
    let merged = Config {
        playlist_size: size.unwrap_or(config.playlist_size),
        explicit_filter: explicit.unwrap_or(config.explicit_filter),
        ..config.clone()
    };
    merged
        .playlist_options()
        .context("Invalid playlist options")
}

pub async fn run_recommend(config: &Config, request: Request) -> Result<()> {
    let options = resolve_options(config, request.size, request.explicit)?;
    let signal = ImageSignal::new(request.labels, request.color);

    log::info!(
        "Recommending {} tracks for [{}] at {}",
        options.playlist_size(),
        signal.labels.join(", "),
        signal.color
    );

    let embedder = OllamaEmbedder::new(&config.embedding_url, &config.embedding_model)
        .context("Failed to create embedding client")?;
    let index = Arc::new(GenreIndex::new(Arc::new(embedder)));
    let mapper = SmartMapper::new(index);

    let outcome = mapper
        .map(&signal)
        .await
        .context("Failed to map image signal to a music profile")?;

    let (client_id, client_secret) = config.spotify_credentials()?;
    let auth = ClientCredentialsAuth::new(client_id, client_secret)?;
    let catalog = SpotifyCatalog::new(Arc::new(auth), &config.spotify_market)?;
    let assembler = PlaylistAssembler::new(Arc::new(catalog));

    let tracks = assembler
        .assemble(&outcome.profile, &options)
        .await
        .context("Failed to assemble playlist")?;

    if request.json {
        println!("{}", render_json(&outcome.profile, &tracks)?);
    } else {
        print_playlist(&outcome.profile, &tracks);
    }

    Ok(())
}

fn render_json(profile: &MusicProfile, tracks: &[Track]) -> Result<String> {
    let views: Vec<_> = tracks.iter().map(Track::to_view).collect();
    let body = serde_json::json!({
        "profile": profile,
        "tracks": views,
    });
    serde_json::to_string_pretty(&body).context("Failed to serialize playlist")
}

fn print_playlist(profile: &MusicProfile, tracks: &[Track]) {
    println!("Music Profile");
    println!("=============\n");
    println!("  energy:       {:.2}", profile.energy);
    println!("  valence:      {:.2}", profile.valence);
    println!("  acousticness: {:.2}", profile.acousticness);
    println!("  genres:       {}", profile.genre_seeds.join(", "));

    println!("\nPlaylist ({} tracks)", tracks.len());
    println!("========\n");

    if tracks.is_empty() {
        println!("No tracks found");
        return;
    }

    for (position, track) in tracks.iter().enumerate() {
        let marker = if track.has_preview() { "▶" } else { " " };
        println!(
            "{:>3}. {} {} - {} [{}]",
            position + 1,
            marker,
            track.artist,
            track.name,
            track.album_name
        );
        if !track.external_url.is_empty() {
            println!("        {}", track.external_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_options_uses_config_defaults() {
        let config = Config {
            playlist_size: 15,
            explicit_filter: ExplicitFilter::Any,
            ..Config::default()
        };
        let options = resolve_options(&config, None, None).unwrap();
        assert_eq!(options.playlist_size(), 15);
        assert_eq!(options.explicit_filter, ExplicitFilter::Any);
    }

    #[test]
    fn test_resolve_options_flags_override_config() {
        let config = Config::default();
        let options = resolve_options(&config, Some(3), Some(ExplicitFilter::Any)).unwrap();
        assert_eq!(options.playlist_size(), 3);
        assert_eq!(options.explicit_filter, ExplicitFilter::Any);
    }

    #[test]
    fn test_resolve_options_rejects_zero_size() {
        assert!(resolve_options(&Config::default(), Some(0), None).is_err());
    }

    #[test]
    fn test_render_json_shape() {
        let profile = MusicProfile {
            energy: 0.8,
            valence: 0.7,
            acousticness: 0.9,
            genre_seeds: vec!["surf rock".to_string()],
        };
        let track = Track {
            id: "abc".to_string(),
            name: "Wipe Out".to_string(),
            artist: "The Surfaris".to_string(),
            preview_url: None,
            external_url: "https://open.spotify.com/track/abc".to_string(),
            explicit: false,
            popularity: 60,
            album_art: None,
            album_name: "Wipe Out".to_string(),
        };

        let rendered = render_json(&profile, &[track]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["profile"]["genreSeeds"][0], "surf rock");
        assert_eq!(value["tracks"][0]["name"], "Wipe Out");
        // the view drops catalog-internal fields
        assert!(value["tracks"][0].get("popularity").is_none());
        assert!(value["tracks"][0].get("id").is_none());
    }
}
