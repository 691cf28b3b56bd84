//! Static genre tables.
//!
//! [`vocabulary`] holds the descriptor vocabulary ranked by embedding
//! similarity; [`catalog`] holds the genre tokens the track catalog accepts
//! and the mood keywords that sharpen a genre query.

pub mod catalog;
pub mod vocabulary;

pub use catalog::{is_catalog_genre, mood_keywords, CATALOG_GENRES, DEFAULT_CATALOG_GENRE};
pub use vocabulary::GENRE_VOCABULARY;
