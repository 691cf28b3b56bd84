use serde::{Deserialize, Serialize};

/// Music characteristics derived from a colour alone.
///
/// All values are in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorProfile {
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
}

/// The fused music profile handed to playlist assembly.
///
/// `energy`, `valence`, and `acousticness` are clamped to `0.0..=1.0` and
/// rounded to two decimals. `genre_seeds` holds at most four distinct
/// genre descriptors, strongest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicProfile {
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub genre_seeds: Vec<String>,
}
