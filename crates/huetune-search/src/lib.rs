//! Genre matching for huetune.
//!
//! Embeds the fixed genre vocabulary once through an [`EmbeddingProvider`],
//! ranks free text against it by cosine similarity, and maps a whole
//! [`ImageSignal`](huetune_core::model::ImageSignal) to a
//! [`MusicProfile`](huetune_core::model::MusicProfile).

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod embedding;
pub mod error;
pub mod index;
pub mod mapping;
pub mod similarity;

pub use embedding::{EmbeddingProvider, OllamaEmbedder};
pub use error::{SearchError, SearchResult};
pub use index::{GenreEntry, GenreIndex};
pub use mapping::{MappingOutcome, SmartMapper};
pub use similarity::SimilaritySearch;
