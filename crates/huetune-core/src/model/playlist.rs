use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of tracks in a playlist.
pub const DEFAULT_PLAYLIST_SIZE: usize = 10;

/// Whether explicit tracks may appear in a playlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplicitFilter {
    /// Drop tracks flagged as explicit.
    #[default]
    Clean,
    /// Keep everything.
    Any,
}

impl ExplicitFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Any => "any",
        }
    }

    #[must_use]
    pub const fn is_clean(self) -> bool {
        matches!(self, Self::Clean)
    }
}

impl fmt::Display for ExplicitFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExplicitFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("clean") {
            Ok(Self::Clean)
        } else if s.eq_ignore_ascii_case("any") {
            Ok(Self::Any)
        } else {
            Err(Error::InvalidData(format!(
                "unknown explicit filter '{s}' (expected 'clean' or 'any')"
            )))
        }
    }
}

/// Request-level playlist options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistOptions {
    playlist_size: usize,
    pub explicit_filter: ExplicitFilter,
}

impl PlaylistOptions {
    /// Build options, rejecting an empty playlist.
    pub fn new(playlist_size: usize, explicit_filter: ExplicitFilter) -> Result<Self> {
        if playlist_size == 0 {
            return Err(Error::InvalidData(
                "playlist size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            playlist_size,
            explicit_filter,
        })
    }

    #[must_use]
    pub const fn playlist_size(&self) -> usize {
        self.playlist_size
    }
}

impl Default for PlaylistOptions {
    fn default() -> Self {
        Self {
            playlist_size: DEFAULT_PLAYLIST_SIZE,
            explicit_filter: ExplicitFilter::Clean,
        }
    }
}
