use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use huetune_core::model::playlist::DEFAULT_PLAYLIST_SIZE;
use huetune_core::model::{ExplicitFilter, PlaylistOptions};

use crate::error::{CatalogError, CatalogResult};

/// Configuration for huetune.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (HUETUNE_* prefix)
/// 3. Config file (~/.config/huetune/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Spotify application client ID.
    ///
    /// Can be set via:
    /// - ENV: HUETUNE_SPOTIFY_CLIENT_ID
    /// - Config: spotify_client_id = "..."
    #[serde(default)]
    pub spotify_client_id: Option<String>,

    /// Spotify application client secret.
    ///
    /// Can be set via:
    /// - ENV: HUETUNE_SPOTIFY_CLIENT_SECRET
    /// - Config: spotify_client_secret = "..."
    #[serde(default)]
    pub spotify_client_secret: Option<String>,

    /// Market (ISO 3166-1 alpha-2) used to filter catalog results.
    #[serde(default = "default_market")]
    pub spotify_market: String,

    /// Base URL of the Ollama server used for embeddings.
    #[serde(default = "default_embedding_url")]
    pub embedding_url: String,

    /// Embedding model name.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Number of tracks per playlist.
    ///
    /// Can be set via:
    /// - CLI: huetune recommend --size 20
    /// - ENV: HUETUNE_PLAYLIST_SIZE
    #[serde(default = "default_playlist_size")]
    pub playlist_size: usize,

    /// `clean` drops explicit tracks; `any` keeps them.
    #[serde(default)]
    pub explicit_filter: ExplicitFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_client_secret: None,
            spotify_market: default_market(),
            embedding_url: default_embedding_url(),
            embedding_model: default_embedding_model(),
            playlist_size: default_playlist_size(),
            explicit_filter: ExplicitFilter::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and
    /// `HUETUNE_*` environment variables.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("huetune");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Validated playlist options from the configured size and filter.
    pub fn playlist_options(&self) -> CatalogResult<PlaylistOptions> {
        Ok(PlaylistOptions::new(self.playlist_size, self.explicit_filter)?)
    }

    /// The Spotify client ID and secret, if both are set.
    pub fn spotify_credentials(&self) -> CatalogResult<(&str, &str)> {
        let id = self
            .spotify_client_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("spotify_client_id"))?;
        let secret = self
            .spotify_client_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("spotify_client_secret"))?;
        Ok((id, secret))
    }
}

fn missing(key: &str) -> CatalogError {
    CatalogError::Config(format!(
        "{key} is not set (use 'huetune config set {key} <value>' or HUETUNE_{})",
        key.to_uppercase()
    ))
}

fn default_market() -> String {
    "US".to_string()
}

fn default_embedding_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_playlist_size() -> usize {
    DEFAULT_PLAYLIST_SIZE
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/huetune/config.toml
/// - macOS: ~/Library/Application Support/huetune/config.toml
/// - Windows: %APPDATA%\huetune\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("huetune")
        .join("config.toml")
}

/// Names of every settable key, in file order.
pub const CONFIG_KEYS: &[&str] = &[
    "spotify_client_id",
    "spotify_client_secret",
    "spotify_market",
    "embedding_url",
    "embedding_model",
    "playlist_size",
    "explicit_filter",
];

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Huetune Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (HUETUNE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Spotify application credentials (client credentials flow)
#
# Create an app at: https://developer.spotify.com/dashboard
#
# Can also be set via:
# - Environment: HUETUNE_SPOTIFY_CLIENT_ID / HUETUNE_SPOTIFY_CLIENT_SECRET
#spotify_client_id = "your-client-id"
#spotify_client_secret = "your-client-secret"

# Market used to filter catalog search results
spotify_market = "US"

# Ollama server and model used to embed genre descriptors and labels
embedding_url = "http://localhost:11434"
embedding_model = "nomic-embed-text"

# Tracks per playlist (at least 1)
playlist_size = 10

# "clean" drops explicit tracks, "any" keeps them
explicit_filter = "clean"
"#
}

/// Create the config file at `config_path` if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Create the default config file if it doesn't exist.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}
