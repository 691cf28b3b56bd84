//! Track catalog access and playlist assembly for huetune.
//!
//! [`PlaylistAssembler`] turns a [`MusicProfile`](huetune_core::model::MusicProfile)
//! into a track list by running a cascade of queries against a
//! [`CatalogSearch`] implementation, then deduplicating, filtering, and
//! ordering the pooled results. [`spotify`] provides the production
//! catalog client.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod resilience;
pub mod source;
pub mod spotify;

pub use assembler::{select_tracks, PlaylistAssembler, YearRange, YearRanges};
pub use config::Config;
pub use error::{CatalogError, CatalogResult};
pub use source::CatalogSearch;
