//! Spotify Web API catalog client.

pub mod auth;
pub mod search;

pub use auth::{ClientCredentialsAuth, StaticToken, TokenProvider};
pub use search::SpotifyCatalog;

pub(crate) const SOURCE_NAME: &str = "Spotify";
pub(crate) const USER_AGENT: &str = "huetune/0.1.0 (https://github.com/oxur/huetune)";
