//! Core domain model for huetune.
//!
//! This crate defines the image-signal and music-profile model, the
//! deterministic colour and label mappers, the contextual phrase builder,
//! profile fusion, and the static genre taxonomy tables shared by the
//! search and catalog crates.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod color;
pub mod context;
pub mod error;
pub mod fusion;
pub mod model;
pub mod mood;
pub mod taxonomy;
pub mod vector;

pub use error::{Error, Result};
